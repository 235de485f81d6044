//! Settings file loading
//!
//! Handles loading settings from TOML files.

use crate::error::SettingsError;
use crate::settings::Settings;

use std::path::{Path, PathBuf};

/// Settings file handler
pub struct SettingsFile;

impl SettingsFile {
    /// Load settings from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Settings, SettingsError> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| SettingsError::FileNotFound(path.display().to_string()))?;

        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from the first default location that parses
    pub fn load_default() -> Option<Settings> {
        for path in Self::default_paths() {
            if path.exists() {
                match Self::load(&path) {
                    Ok(settings) => {
                        log::info!("Loaded settings from {}", path.display());
                        return Some(settings);
                    }
                    Err(e) => log::warn!("Ignoring {}: {}", path.display(), e),
                }
            }
        }
        None
    }

    /// Get default settings file paths
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // System-wide settings
        paths.push(PathBuf::from("/etc/ruleconf/config.toml"));

        // User settings
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("ruleconf").join("config.toml"));
        }

        // Current directory
        paths.push(PathBuf::from("ruleconf.toml"));

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths_not_empty() {
        let paths = SettingsFile::default_paths();
        assert!(!paths.is_empty());
        assert!(paths.iter().all(|p| p.ends_with("config.toml") || p.ends_with("ruleconf.toml")));
    }

    #[test]
    fn test_load_missing_file() {
        let result = SettingsFile::load("/nonexistent/path/config.toml");
        assert!(matches!(result, Err(SettingsError::FileNotFound(_))));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ruleconf.toml");
        std::fs::write(&path, "[rules]\npatterns = [\"a/*.yml\"]\n").unwrap();
        let settings = SettingsFile::load(&path).unwrap();
        assert_eq!(settings.rules.patterns, vec!["a/*.yml"]);
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ruleconf.toml");
        std::fs::write(&path, "[rules\n").unwrap();
        assert!(matches!(SettingsFile::load(&path), Err(SettingsError::TomlError(_))));
    }
}
