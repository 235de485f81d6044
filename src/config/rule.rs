//! Recording and alerting rule definitions

use super::de;
use crate::domain::HumanDuration;
use crate::error::RuleError;
use fnv::FnvHasher;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::hash::Hasher;

/// Written after every label key and value so `{"ab":"c"}` and `{"a":"bc"}` differ.
/// The byte never occurs in UTF-8 text.
const LABEL_SEPARATOR: u8 = 0xff;

/// Rule kind derived from which of `record`/`alert` is set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Recording,
    Alerting,
}

impl RuleKind {
    /// Tag mixed into the rule fingerprint
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recording => "recording",
            Self::Alerting => "alerting",
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recording or alerting rule
///
/// `id` is not part of the file format. It is filled in by [`Rule::seal`]
/// once the rule has been decoded.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Rule {
    #[serde(skip)]
    pub id: u64,
    #[serde(
        default,
        deserialize_with = "de::scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub record: String,
    #[serde(
        default,
        deserialize_with = "de::scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub alert: String,
    #[serde(default, deserialize_with = "de::scalar_string")]
    pub expr: String,
    #[serde(default, rename = "for", skip_serializing_if = "Option::is_none")]
    pub for_duration: Option<HumanDuration>,
    #[serde(
        default,
        deserialize_with = "de::scalar_map",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub labels: BTreeMap<String, String>,
    #[serde(
        default,
        deserialize_with = "de::scalar_map",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub annotations: BTreeMap<String, String>,

    /// Keys not covered by the schema; must be empty for a valid rule
    #[serde(flatten)]
    pub unknown: BTreeMap<String, serde_yaml::Value>,
}

impl Rule {
    /// Create a recording rule
    pub fn recording(name: impl Into<String>, expr: impl Into<String>) -> Self {
        Self {
            record: name.into(),
            expr: expr.into(),
            ..Self::default()
        }
        .seal()
    }

    /// Create an alerting rule
    pub fn alerting(name: impl Into<String>, expr: impl Into<String>) -> Self {
        Self {
            alert: name.into(),
            expr: expr.into(),
            ..Self::default()
        }
        .seal()
    }

    /// Set the pending period
    pub fn with_for(mut self, duration: HumanDuration) -> Self {
        self.for_duration = Some(duration);
        self
    }

    /// Add a label and refresh the id
    pub fn with_label(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(name.into(), value.into());
        self.seal()
    }

    /// Add an annotation
    pub fn with_annotation(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(name.into(), value.into());
        self
    }

    /// Rule name: `record` for recording rules, `alert` otherwise
    pub fn name(&self) -> &str {
        if !self.record.is_empty() {
            &self.record
        } else {
            &self.alert
        }
    }

    pub fn kind(&self) -> RuleKind {
        if !self.record.is_empty() {
            RuleKind::Recording
        } else {
            RuleKind::Alerting
        }
    }

    /// 64-bit FNV-1a fingerprint over expr, kind, name and sorted labels
    ///
    /// Annotations and `for` do not take part in rule identity.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = FnvHasher::default();
        hasher.write(self.expr.as_bytes());
        hasher.write(self.kind().as_str().as_bytes());
        hasher.write(self.name().as_bytes());
        // BTreeMap iterates in ascending key order
        for (key, value) in &self.labels {
            hasher.write(key.as_bytes());
            hasher.write(&[LABEL_SEPARATOR]);
            hasher.write(value.as_bytes());
            hasher.write(&[LABEL_SEPARATOR]);
        }
        hasher.finish()
    }

    /// Compute and store the fingerprint
    pub fn seal(mut self) -> Self {
        self.id = self.fingerprint();
        self
    }

    /// Check rule-level invariants
    pub fn validate(&self) -> Result<(), RuleError> {
        if self.record.is_empty() == self.alert.is_empty() {
            return Err(RuleError::AmbiguousKind);
        }
        if self.expr.is_empty() {
            return Err(RuleError::EmptyExpression);
        }
        if !self.unknown.is_empty() {
            return Err(RuleError::UnknownFields(join_keys(&self.unknown)));
        }
        Ok(())
    }
}

/// Comma-separated list of catch-all keys
pub(crate) fn join_keys(unknown: &BTreeMap<String, serde_yaml::Value>) -> String {
    unknown.keys().cloned().collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_and_kind() {
        let rec = Rule::recording("job:up:sum", "sum(up)");
        assert_eq!(rec.name(), "job:up:sum");
        assert_eq!(rec.kind(), RuleKind::Recording);

        let alert = Rule::alerting("InstanceDown", "up == 0");
        assert_eq!(alert.name(), "InstanceDown");
        assert_eq!(alert.kind(), RuleKind::Alerting);
    }

    #[test]
    fn test_fingerprint_independent_of_label_insertion_order() {
        let a = Rule::alerting("HighLoad", "load > 1")
            .with_label("severity", "page")
            .with_label("team", "infra");
        let b = Rule::alerting("HighLoad", "load > 1")
            .with_label("team", "infra")
            .with_label("severity", "page");
        assert_eq!(a.id, b.id);
        assert_ne!(a.id, 0);
    }

    #[test]
    fn test_fingerprint_sensitive_to_identity_fields() {
        let base = Rule::alerting("HighLoad", "load > 1").with_label("severity", "page");

        let other_expr = Rule::alerting("HighLoad", "load > 2").with_label("severity", "page");
        let other_name = Rule::alerting("HighLoad2", "load > 1").with_label("severity", "page");
        let other_kind = Rule::recording("HighLoad", "load > 1").with_label("severity", "page");
        let other_value = Rule::alerting("HighLoad", "load > 1").with_label("severity", "ticket");
        let other_key = Rule::alerting("HighLoad", "load > 1").with_label("priority", "page");

        for other in [other_expr, other_name, other_kind, other_value, other_key] {
            assert_ne!(base.id, other.id, "{:?}", other);
        }
    }

    #[test]
    fn test_fingerprint_label_separator() {
        let a = Rule::recording("r", "up").with_label("ab", "c");
        let b = Rule::recording("r", "up").with_label("a", "bc");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_fingerprint_label_boundaries() {
        // value bytes shifted across an entry boundary
        let a = Rule::recording("r", "up").with_label("a", "b").with_label("c", "d");
        let b = Rule::recording("r", "up").with_label("a", "bc").with_label("d", "");
        assert_ne!(a.id, b.id);

        let empty_value = Rule::recording("r", "up").with_label("ab", "");
        let split = Rule::recording("r", "up").with_label("a", "b");
        assert_ne!(empty_value.id, split.id);
    }

    #[test]
    fn test_fingerprint_ignores_annotations_and_for() {
        let a = Rule::alerting("Down", "up == 0");
        let b = Rule::alerting("Down", "up == 0")
            .with_for(HumanDuration::from_secs(300))
            .with_annotation("summary", "instance down")
            .seal();
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn test_validate_kind_exclusivity() {
        let both = Rule {
            record: "r".to_string(),
            alert: "a".to_string(),
            expr: "up".to_string(),
            ..Rule::default()
        };
        assert_eq!(both.validate(), Err(RuleError::AmbiguousKind));

        let neither = Rule {
            expr: "up".to_string(),
            ..Rule::default()
        };
        assert_eq!(neither.validate(), Err(RuleError::AmbiguousKind));

        assert!(Rule::recording("r", "up").validate().is_ok());
    }

    #[test]
    fn test_validate_empty_expr() {
        let rule = Rule::alerting("a", "");
        assert_eq!(rule.validate(), Err(RuleError::EmptyExpression));
    }

    #[test]
    fn test_decode_collects_unknown_fields() {
        let rule: Rule = serde_yaml::from_str("record: r\nexpr: up\nfoo: bar\n").unwrap();
        match rule.validate() {
            Err(RuleError::UnknownFields(fields)) => assert_eq!(fields, "foo"),
            other => panic!("expected unknown fields error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_full_rule() {
        let yaml = r#"
alert: Down
expr: up == 0
for: 5m
labels:
  severity: page
annotations:
  summary: "{{ $labels.instance }} down"
"#;
        let rule: Rule = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(rule.id, 0);
        let rule = rule.seal();
        assert_eq!(rule.alert, "Down");
        assert_eq!(rule.for_duration, Some(HumanDuration::from_secs(300)));
        assert_eq!(rule.labels.get("severity").map(String::as_str), Some("page"));
        assert!(rule.unknown.is_empty());
        assert_eq!(rule.id, Rule::alerting("Down", "up == 0").with_label("severity", "page").id);
    }
}
