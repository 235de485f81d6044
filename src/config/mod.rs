//! Rule configuration
//!
//! Model, decoding, fingerprinting and validation of recording/alerting
//! rule groups loaded from YAML files.

pub mod builder;
mod de;
pub mod file;
pub mod group;
pub mod rule;

pub use builder::RuleLoader;
pub use file::{apply_global, expand_patterns, parse_file, parse_str, Global};
pub use group::Group;
pub use rule::{Rule, RuleKind};

use crate::error::ConfigError;

/// Load and validate every group from files matching `patterns`
///
/// Fails on the first unreadable file, decode error or invalid group.
/// Finding no groups at all is logged as a warning and is not an error.
pub fn parse<S: AsRef<str>>(
    patterns: &[S],
    validate_annotations: bool,
    validate_expressions: bool,
) -> Result<Vec<Group>, ConfigError> {
    file::parse_with(
        patterns,
        &crate::expr::SyntaxChecker,
        &crate::template::TemplateChecker,
        validate_annotations,
        validate_expressions,
    )
}
