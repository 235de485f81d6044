//! Metric sample types
//!
//! Samples returned by an instant query against the datasource.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single label name/value pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    pub value: String,
}

impl Label {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One sample of an instant vector
///
/// Label order is not guaranteed to match the order in the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub labels: Vec<Label>,
    /// Unix timestamp in seconds
    pub timestamp: i64,
    pub value: f64,
}

impl Metric {
    /// Look up a label value by name
    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|l| l.name == name)
            .map(|l| l.value.as_str())
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut labels: Vec<_> = self
            .labels
            .iter()
            .map(|l| format!("{}={:?}", l.name, l.value))
            .collect();
        labels.sort();
        write!(f, "{{{}}} {} @{}", labels.join(", "), self.value, self.timestamp)
    }
}
