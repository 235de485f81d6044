//! Rule groups
//!
//! A group is an ordered set of rules evaluated together with a shared
//! interval, concurrency and tenant.

use super::de;
use super::rule::{join_keys, Rule};
use crate::domain::{HumanDuration, TenantToken};
use crate::error::ValidationError;
use crate::expr::{ExprValidator, SyntaxChecker};
use crate::template::{TemplateChecker, TemplateValidator};
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Named, ordered collection of rules
///
/// `file` and `checksum` are not read from the rule file: the loader sets
/// `file`, and [`Group::seal`] computes `checksum`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Group {
    #[serde(skip)]
    pub file: String,
    #[serde(default, deserialize_with = "de::scalar_string")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<HumanDuration>,
    #[serde(default)]
    pub rules: Vec<Rule>,
    /// Passed through to the evaluation scheduler
    #[serde(default)]
    pub concurrency: usize,
    #[serde(default, deserialize_with = "de::scalar_string")]
    pub tenant: String,
    #[serde(skip)]
    pub checksum: String,

    /// Keys not covered by the schema; must be empty for a valid group
    #[serde(flatten)]
    pub unknown: BTreeMap<String, serde_yaml::Value>,
}

impl Group {
    /// Create a sealed group from rules
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Result<Self, serde_yaml::Error> {
        Self {
            name: name.into(),
            rules,
            ..Self::default()
        }
        .seal()
    }

    /// MD5 hex digest of the group re-serialized to YAML
    ///
    /// The digest follows field values, not source formatting. Rule order
    /// is significant.
    pub fn checksum(&self) -> Result<String, serde_yaml::Error> {
        let serialized = serde_yaml::to_string(self)?;
        Ok(format!("{:x}", Md5::digest(serialized.as_bytes())))
    }

    /// Compute rule ids and the group checksum
    pub fn seal(mut self) -> Result<Self, serde_yaml::Error> {
        self.rules = self.rules.into_iter().map(Rule::seal).collect();
        self.checksum = self.checksum()?;
        Ok(self)
    }

    /// Validate with the built-in expression and template checkers
    pub fn validate(
        &self,
        validate_annotations: bool,
        validate_expressions: bool,
    ) -> Result<(), ValidationError> {
        self.validate_with(
            &SyntaxChecker,
            &TemplateChecker,
            validate_annotations,
            validate_expressions,
        )
    }

    /// Validate the group, stopping at the first problem
    pub fn validate_with(
        &self,
        expressions: &dyn ExprValidator,
        templates: &dyn TemplateValidator,
        validate_annotations: bool,
        validate_expressions: bool,
    ) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.rules.is_empty() {
            return Err(ValidationError::NoRules(self.name.clone()));
        }
        TenantToken::parse(&self.tenant)?;

        let mut seen = HashSet::with_capacity(self.rules.len());
        for rule in &self.rules {
            let rule_name = rule.name();

            rule.validate().map_err(|source| ValidationError::InvalidRule {
                group: self.name.clone(),
                rule: rule_name.to_string(),
                source,
            })?;

            if !seen.insert(rule.fingerprint()) {
                return Err(ValidationError::DuplicateRule(rule_name.to_string()));
            }

            if validate_expressions {
                expressions
                    .validate(&rule.expr)
                    .map_err(|message| ValidationError::InvalidExpression {
                        group: self.name.clone(),
                        rule: rule_name.to_string(),
                        message,
                    })?;
            }

            if validate_annotations {
                templates.validate(&rule.annotations).map_err(|message| {
                    ValidationError::InvalidAnnotations {
                        group: self.name.clone(),
                        rule: rule_name.to_string(),
                        message,
                    }
                })?;
                templates
                    .validate(&rule.labels)
                    .map_err(|message| ValidationError::InvalidLabels {
                        group: self.name.clone(),
                        rule: rule_name.to_string(),
                        message,
                    })?;
            }
        }

        if !self.unknown.is_empty() {
            return Err(ValidationError::UnknownFields {
                group: self.name.clone(),
                fields: join_keys(&self.unknown),
            });
        }
        Ok(())
    }
}
