//! CLI argument definitions using clap derive
//!
//! Defines all command-line arguments and subcommands.

use crate::domain::{HumanDuration, TenantToken};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Alerting and recording rule checker
///
/// Load rule files, validate them and run ad-hoc instant queries.
#[derive(Parser, Debug)]
#[command(name = "ruleconf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Path to settings file
    #[arg(short, long, global = true, env = "RULECONF_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load and validate rule files
    Check(CheckArgs),

    /// Run an instant query against the datasource
    Query(QueryArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Rule file glob pattern (repeatable)
    #[arg(short, long = "rule", value_name = "PATTERN")]
    pub rules: Vec<String>,

    /// Skip label and annotation template validation
    #[arg(long)]
    pub skip_template_validation: bool,

    /// Skip expression validation
    #[arg(long)]
    pub skip_expr_validation: bool,
}

/// Arguments for the query command
#[derive(Parser, Debug)]
pub struct QueryArgs {
    /// Query expression
    pub expr: String,

    /// Datasource base URL
    #[arg(long, env = "RULECONF_DATASOURCE_URL")]
    pub url: Option<String>,

    /// The URL carries a /select/<tenant>/ segment
    #[arg(long)]
    pub tenancy: bool,

    /// Tenant to query instead of the URL default (accountID[:projectID])
    #[arg(long, value_parser = clap::value_parser!(TenantToken))]
    pub tenant: Option<TenantToken>,

    /// Evaluate the query this far in the past (e.g. 30s)
    #[arg(long, value_parser = clap::value_parser!(HumanDuration))]
    pub lookback: Option<HumanDuration>,

    /// Basic-auth username
    #[arg(long)]
    pub basic_auth_user: Option<String>,

    /// Basic-auth password
    #[arg(long, env = "RULECONF_BASIC_AUTH_PASSWORD", hide_env_values = true)]
    pub basic_auth_password: Option<String>,
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}
