//! Command handlers
//!
//! Each command handler orchestrates the execution of a CLI command.

pub mod check;
pub mod query;

pub use check::run_check;
pub use query::{execute, run_query};
