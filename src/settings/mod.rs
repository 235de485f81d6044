//! Application settings
//!
//! Handles TOML settings file parsing and CLI argument merging.

pub mod builder;
pub mod file;

pub use builder::SettingsBuilder;
pub use file::SettingsFile;

use crate::domain::HumanDuration;
use serde::{Deserialize, Serialize};

/// Main settings structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Rule file settings
    pub rules: RuleSettings,
    /// Query datasource settings
    pub datasource: DatasourceSettings,
}

/// Rule file settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RuleSettings {
    /// File glob patterns
    pub patterns: Vec<String>,
    /// Validate label and annotation templates
    pub validate_templates: bool,
    /// Validate rule expressions
    pub validate_expressions: bool,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            patterns: Vec::new(),
            validate_templates: true,
            validate_expressions: true,
        }
    }
}

/// Query datasource settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct DatasourceSettings {
    /// Base URL of the query API
    pub url: Option<String>,
    /// Treat the URL as tenant-scoped (`/select/<tenant>/`)
    pub tenancy: bool,
    /// Query this far in the past
    pub lookback: HumanDuration,
    pub basic_auth_user: String,
    pub basic_auth_password: String,
}
