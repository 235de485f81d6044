//! Check command implementation
//!
//! Loads and validates rule files, then prints the resulting groups.

use crate::cli::args::{CheckArgs, OutputFormat};
use crate::cli::output::{print_output, GroupList};
use crate::config::{Group, RuleLoader};
use crate::error::{AppError, Result};
use crate::settings::{RuleSettings, SettingsBuilder};

/// Execute the check command
pub fn run_check(args: &CheckArgs, format: OutputFormat, config: Option<&str>) -> Result<()> {
    let settings = SettingsBuilder::new()
        .with_file(config)?
        .with_patterns(&args.rules)
        .with_skip_templates(args.skip_template_validation)
        .with_skip_expressions(args.skip_expr_validation)
        .build();

    let groups = load_groups(&settings.rules)?;
    print_output(&GroupList::from(groups.as_slice()), format)?;

    Ok(())
}

/// Load groups as configured by rule settings
pub fn load_groups(settings: &RuleSettings) -> Result<Vec<Group>> {
    if settings.patterns.is_empty() {
        return Err(AppError::MissingSetting(
            "rule file pattern (--rule or [rules].patterns)".to_string(),
        ));
    }

    let groups = RuleLoader::new()
        .with_patterns(settings.patterns.iter().cloned())
        .validate_annotations(settings.validate_templates)
        .validate_expressions(settings.validate_expressions)
        .load()?;
    Ok(groups)
}
