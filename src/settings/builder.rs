//! Settings builder
//!
//! Merges settings from files and CLI arguments.

use crate::domain::HumanDuration;
use crate::error::SettingsError;
use crate::settings::{Settings, SettingsFile};

/// Builder for merging settings sources
pub struct SettingsBuilder {
    settings: Settings,
}

impl SettingsBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
        }
    }

    /// Load settings from an explicit file, or the default locations
    ///
    /// A missing or broken explicit file is an error; default locations
    /// are optional.
    pub fn with_file(mut self, path: Option<&str>) -> Result<Self, SettingsError> {
        let file_settings = match path {
            Some(path) => Some(SettingsFile::load(path)?),
            None => SettingsFile::load_default(),
        };

        if let Some(settings) = file_settings {
            self.settings = settings;
        }

        Ok(self)
    }

    /// Override rule patterns when any were given on the command line
    pub fn with_patterns(mut self, patterns: &[String]) -> Self {
        if !patterns.is_empty() {
            self.settings.rules.patterns = patterns.to_vec();
        }
        self
    }

    /// Disable template validation
    pub fn with_skip_templates(mut self, skip: bool) -> Self {
        if skip {
            self.settings.rules.validate_templates = false;
        }
        self
    }

    /// Disable expression validation
    pub fn with_skip_expressions(mut self, skip: bool) -> Self {
        if skip {
            self.settings.rules.validate_expressions = false;
        }
        self
    }

    /// Override datasource URL
    pub fn with_url(mut self, url: Option<String>) -> Self {
        if let Some(u) = url {
            self.settings.datasource.url = Some(u);
        }
        self
    }

    /// Enable tenancy
    pub fn with_tenancy(mut self, tenancy: bool) -> Self {
        if tenancy {
            self.settings.datasource.tenancy = true;
        }
        self
    }

    /// Override look-back window
    pub fn with_lookback(mut self, lookback: Option<HumanDuration>) -> Self {
        if let Some(l) = lookback {
            self.settings.datasource.lookback = l;
        }
        self
    }

    /// Override basic-auth credentials
    pub fn with_basic_auth(mut self, user: Option<String>, password: Option<String>) -> Self {
        if let Some(u) = user {
            self.settings.datasource.basic_auth_user = u;
        }
        if let Some(p) = password {
            self.settings.datasource.basic_auth_password = p;
        }
        self
    }

    /// Build the final settings
    pub fn build(self) -> Settings {
        self.settings
    }
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
