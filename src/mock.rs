//! Mock implementations for testing
//!
//! Provides stub validators and a canned querier.

use crate::datasource::Querier;
use crate::domain::{Metric, TenantToken};
use crate::error::QueryError;
use crate::expr::ExprValidator;
use crate::template::TemplateValidator;

use std::collections::BTreeMap;
use std::sync::Mutex;

/// Expression validator that rejects everything
#[derive(Debug, Default)]
pub struct RejectAllExprs;

impl ExprValidator for RejectAllExprs {
    fn validate(&self, expr: &str) -> Result<(), String> {
        Err(format!("rejected {:?}", expr))
    }
}

/// Template validator that rejects any non-empty map
#[derive(Debug, Default)]
pub struct RejectAllTemplates;

impl TemplateValidator for RejectAllTemplates {
    fn validate(&self, templates: &BTreeMap<String, String>) -> Result<(), String> {
        match templates.keys().next() {
            Some(key) => Err(format!("rejected template {}", key)),
            None => Ok(()),
        }
    }
}

/// Querier returning fixed samples and recording every call
#[derive(Debug, Default)]
pub struct StaticQuerier {
    samples: Vec<Metric>,
    calls: Mutex<Vec<(Option<TenantToken>, String)>>,
}

impl StaticQuerier {
    pub fn new(samples: Vec<Metric>) -> Self {
        Self {
            samples,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(Option<TenantToken>, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Querier for StaticQuerier {
    fn query(&self, tenant: Option<&TenantToken>, query: &str) -> Result<Vec<Metric>, QueryError> {
        self.calls
            .lock()
            .unwrap()
            .push((tenant.copied(), query.to_string()));
        Ok(self.samples.clone())
    }
}
