//! ruleconf - alerting and recording rule configuration
//!
//! This library loads rule groups from YAML files, fingerprints rules,
//! checksums groups and validates them. It also provides a small
//! instant-query client for the datasource the rules run against.
//!
//! # Modules
//!
//! - [`cli`]: Command-line interface definitions
//! - [`commands`]: Command handlers
//! - [`config`]: Rule groups, rules and the file loader
//! - [`datasource`]: Instant-query client
//! - [`domain`]: Value types with validation
//! - [`envtemplate`]: `%{ENV}` substitution
//! - [`error`]: Error types
//! - [`expr`]: Expression syntax validation
//! - [`settings`]: Application settings
//! - [`template`]: Label/annotation template validation

pub mod cli;
pub mod commands;
pub mod config;
pub mod datasource;
pub mod domain;
pub mod envtemplate;
pub mod error;
pub mod expr;
pub mod settings;
pub mod template;

#[cfg(test)]
pub mod mock;

pub use error::{AppError, Result};
