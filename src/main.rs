//! ruleconf - rule configuration checker
//!
//! A command-line tool for validating alerting/recording rule files and
//! running instant queries against the rules' datasource.

use clap::Parser;
use ruleconf::cli::args::{generate_completions, Cli, Commands};
use ruleconf::commands::{run_check, run_query};
use ruleconf::error::AppError;

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Set log level based on verbose flag
    if cli.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    let result = run(&cli);

    if let Err(e) = result {
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let config = cli.config.as_deref();
    match &cli.command {
        Commands::Check(args) => run_check(args, cli.format, config),

        Commands::Query(args) => run_query(args, cli.format, config),

        Commands::Completions { shell } => {
            generate_completions(*shell);
            Ok(())
        }
    }
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::MissingSetting(_) => {
            eprintln!();
            eprintln!("Hint: Pass the value on the command line or set it in ruleconf.toml.");
        }
        AppError::Query(ruleconf::error::QueryError::Tenant(_)) => {
            eprintln!();
            eprintln!("Hint: With --tenancy the URL must look like http://host/select/<tenant>/prometheus.");
        }
        _ => {}
    }
}
