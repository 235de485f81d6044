//! Unified error types for ruleconf
//!
//! This module defines all error types used throughout the crate.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from rule file loading or validation
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Error from application settings
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// Error from a datasource query
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    /// Invalid tenant token
    #[error("Tenant error: {0}")]
    Tenant(#[from] TenantError),

    /// Invalid duration value
    #[error("Duration error: {0}")]
    Duration(#[from] DurationError),

    /// Required setting missing after merging file and CLI
    #[error("Missing required setting: {0}")]
    MissingSetting(String),

    /// IO error (stdout, file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from tenant token parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TenantError {
    /// Account id is not an unsigned 32-bit integer
    #[error("cannot parse accountID from {0:?}")]
    InvalidAccountId(String),

    /// Project id is not an unsigned 32-bit integer
    #[error("cannot parse projectID from {0:?}")]
    InvalidProjectId(String),

    /// URL carries no tenant segment
    #[error("cannot find tenant in url {0:?}: expected /select/<accountID[:projectID]>/ path segment")]
    NotInUrl(String),
}

/// Errors from duration parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("empty duration")]
    Empty,

    #[error("invalid duration {0:?}")]
    Invalid(String),

    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },

    #[error("duration {0:?} overflows")]
    Overflow(String),
}

/// Errors from single-rule validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// Neither or both of `record`/`alert` set
    #[error("either `record` or `alert` must be set")]
    AmbiguousKind,

    #[error("expression can't be empty")]
    EmptyExpression,

    #[error("unknown fields in rule: {0}")]
    UnknownFields(String),
}

/// Errors from group validation
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("group name must be set")]
    EmptyName,

    #[error("group {0:?} can't contain no rules")]
    NoRules(String),

    #[error(transparent)]
    Tenant(#[from] TenantError),

    #[error("invalid rule {group:?}.{rule:?}: {source}")]
    InvalidRule {
        group: String,
        rule: String,
        source: RuleError,
    },

    #[error("rule {0:?} duplicate")]
    DuplicateRule(String),

    #[error("invalid expression for rule {group:?}.{rule:?}: {message}")]
    InvalidExpression {
        group: String,
        rule: String,
        message: String,
    },

    #[error("invalid annotations for rule {group:?}.{rule:?}: {message}")]
    InvalidAnnotations {
        group: String,
        rule: String,
        message: String,
    },

    #[error("invalid labels for rule {group:?}.{rule:?}: {message}")]
    InvalidLabels {
        group: String,
        rule: String,
        message: String,
    },

    #[error("unknown fields in group {group:?}: {fields}")]
    UnknownFields { group: String, fields: String },
}

/// Errors from rule file loading
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Malformed glob pattern
    #[error("error reading file pattern {pattern}: {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },

    /// A path matched by a pattern could not be inspected
    #[error("error reading file pattern {pattern}: {source}")]
    Glob {
        pattern: String,
        source: glob::GlobError,
    },

    #[error("failed to parse file {path:?}: error reading rule file: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse file {path:?}: {source}")]
    Yaml {
        path: String,
        source: serde_yaml::Error,
    },

    #[error("failed to parse file {path:?}: unknown fields in config: {fields}")]
    UnknownFields { path: String, fields: String },

    #[error("failed to compute checksum for group {group:?} in file {path:?}: {source}")]
    Checksum {
        path: String,
        group: String,
        source: serde_yaml::Error,
    },

    #[error("invalid group {group:?} in file {path:?}: {source}")]
    InvalidGroup {
        path: String,
        group: String,
        source: ValidationError,
    },

    #[error("group name {group:?} duplicate in file {path:?}")]
    DuplicateGroup { path: String, group: String },
}

/// Errors from datasource queries
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("invalid url addr format: {0}")]
    Tenant(#[from] TenantError),

    #[error("invalid request url {url:?}: {source}")]
    Url {
        url: String,
        source: url::ParseError,
    },

    #[error("error getting response from {url}: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },

    #[error("datasource returns unexpected response code {status} for {url}. Response body {body}")]
    UnexpectedStatus {
        status: u16,
        url: String,
        body: String,
    },

    #[error("error parsing metrics for {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    #[error("response error, query: {url}, errorType: {error_type}, error: {error}")]
    Response {
        url: String,
        error_type: String,
        error: String,
    },

    #[error("unknown status: {0}, Expected success or error")]
    UnknownStatus(String),

    #[error("unknown result type: {0}. Expected vector")]
    UnexpectedResultType(String),

    #[error("metric {metric}, unable to parse float64 from {value:?}: {source}")]
    InvalidValue {
        metric: String,
        value: String,
        source: std::num::ParseFloatError,
    },
}

/// Errors from the application settings file
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Settings file not found
    #[error("Settings file not found: {0}")]
    FileNotFound(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
