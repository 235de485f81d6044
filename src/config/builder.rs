//! Rule loader builder
//!
//! Collects file patterns, validation switches and validators before
//! running a load.

use super::file::parse_with;
use super::group::Group;
use crate::error::ConfigError;
use crate::expr::{ExprValidator, SyntaxChecker};
use crate::template::{TemplateChecker, TemplateValidator};

/// Builder for a rule load
pub struct RuleLoader {
    patterns: Vec<String>,
    validate_annotations: bool,
    validate_expressions: bool,
    expressions: Box<dyn ExprValidator>,
    templates: Box<dyn TemplateValidator>,
}

impl RuleLoader {
    /// Create a loader with both validations enabled and the built-in checkers
    pub fn new() -> Self {
        Self {
            patterns: Vec::new(),
            validate_annotations: true,
            validate_expressions: true,
            expressions: Box::new(SyntaxChecker),
            templates: Box::new(TemplateChecker),
        }
    }

    /// Add a file pattern
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    /// Add several file patterns
    pub fn with_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Toggle label/annotation template validation
    pub fn validate_annotations(mut self, enabled: bool) -> Self {
        self.validate_annotations = enabled;
        self
    }

    /// Toggle expression validation
    pub fn validate_expressions(mut self, enabled: bool) -> Self {
        self.validate_expressions = enabled;
        self
    }

    /// Replace the expression validator
    pub fn with_expr_validator<V: ExprValidator + 'static>(mut self, validator: V) -> Self {
        self.expressions = Box::new(validator);
        self
    }

    /// Replace the template validator
    pub fn with_template_validator<V: TemplateValidator + 'static>(mut self, validator: V) -> Self {
        self.templates = Box::new(validator);
        self
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Run the load
    pub fn load(&self) -> Result<Vec<Group>, ConfigError> {
        parse_with(
            &self.patterns,
            self.expressions.as_ref(),
            self.templates.as_ref(),
            self.validate_annotations,
            self.validate_expressions,
        )
    }
}

impl Default for RuleLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::RejectAllExprs;

    fn rules_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("rules.yml"),
            "groups:\n  - name: g\n    rules:\n      - alert: a\n        expr: up == 0\n",
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_builder_defaults() {
        let loader = RuleLoader::new();
        assert!(loader.patterns().is_empty());
        assert!(loader.load().unwrap().is_empty());
    }

    #[test]
    fn test_builder_patterns() {
        let loader = RuleLoader::new()
            .with_pattern("a/*.yml")
            .with_patterns(["b/*.yml", "c/*.yml"]);
        assert_eq!(loader.patterns(), ["a/*.yml", "b/*.yml", "c/*.yml"]);
    }

    #[test]
    fn test_custom_expr_validator() {
        let dir = rules_dir();
        let pattern = dir.path().join("*.yml").display().to_string();

        let strict = RuleLoader::new()
            .with_pattern(pattern.clone())
            .with_expr_validator(RejectAllExprs);
        assert!(strict.load().is_err());

        let relaxed = RuleLoader::new()
            .with_pattern(pattern)
            .with_expr_validator(RejectAllExprs)
            .validate_expressions(false);
        assert_eq!(relaxed.load().unwrap().len(), 1);
    }
}
