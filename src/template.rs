//! Label and annotation template validation

use std::collections::BTreeMap;

const ACTION_OPEN: &str = "{{";
const ACTION_CLOSE: &str = "}}";

/// Validator for templated label/annotation values
pub trait TemplateValidator: Send + Sync {
    /// Check every value of `templates`, naming the offending key on failure
    fn validate(&self, templates: &BTreeMap<String, String>) -> Result<(), String>;
}

/// Checks `{{ ... }}` action delimiters
///
/// Every action must be closed, must not be empty and must not contain
/// another opening delimiter.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateChecker;

impl TemplateChecker {
    fn check_value(value: &str) -> Result<(), String> {
        let mut rest = value;
        let mut offset = 0;

        while let Some(open) = rest.find(ACTION_OPEN) {
            let body_start = open + ACTION_OPEN.len();
            let body = &rest[body_start..];
            let close = body
                .find(ACTION_CLOSE)
                .ok_or_else(|| format!("unclosed action at position {}", offset + open))?;

            let action = &body[..close];
            if action.contains(ACTION_OPEN) {
                return Err(format!("unexpected {:?} in action at position {}", ACTION_OPEN, offset + open));
            }
            if action.trim_matches(|c: char| c == '-' || c.is_whitespace()).is_empty() {
                return Err(format!("missing value for action at position {}", offset + open));
            }

            let consumed = body_start + close + ACTION_CLOSE.len();
            offset += consumed;
            rest = &rest[consumed..];
        }
        Ok(())
    }
}

impl TemplateValidator for TemplateChecker {
    fn validate(&self, templates: &BTreeMap<String, String>) -> Result<(), String> {
        for (key, value) in templates {
            Self::check_value(value).map_err(|e| format!("error parsing template {}: {}", key, e))?;
        }
        Ok(())
    }
}
