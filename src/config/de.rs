//! Scalar-tolerant deserializers for rule file fields
//!
//! YAML lets users write `tenant: 7` or `severity: 1` without quotes.
//! These helpers accept any scalar where the schema expects a string.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_yaml::Value;
use std::collections::BTreeMap;

fn scalar_to_string<E: de::Error>(value: Value, what: &str) -> Result<String, E> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        Value::Tagged(tagged) => scalar_to_string(tagged.value, what),
        Value::Sequence(_) | Value::Mapping(_) => Err(E::custom(format!(
            "expected a scalar value for {}",
            what
        ))),
    }
}

pub(crate) fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    scalar_to_string(Value::deserialize(deserializer)?, "string field")
}

pub(crate) fn scalar_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    raw.into_iter()
        .map(|(key, value)| {
            let value = scalar_to_string(value, &format!("key {:?}", key))?;
            Ok((key, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "scalar_string")]
        tenant: String,
        #[serde(default, deserialize_with = "scalar_map")]
        labels: BTreeMap<String, String>,
    }

    #[test]
    fn test_numbers_become_strings() {
        let s: Sample = serde_yaml::from_str("tenant: 7\nlabels:\n  priority: 1\n  page: true\n").unwrap();
        assert_eq!(s.tenant, "7");
        assert_eq!(s.labels["priority"], "1");
        assert_eq!(s.labels["page"], "true");
    }

    #[test]
    fn test_null_map_is_empty() {
        let s: Sample = serde_yaml::from_str("labels:\n").unwrap();
        assert!(s.labels.is_empty());
    }

    #[test]
    fn test_nested_value_rejected() {
        let res: Result<Sample, _> = serde_yaml::from_str("labels:\n  a: [1, 2]\n");
        assert!(res.is_err());
    }
}
