//! CLI module - argument parsing, configuration and subcommand runners

mod args;
mod config;
mod entropy;
mod prepare;
mod rank;

pub use args::{derived_path, Cli, Commands, TableArgs};
pub use config::AnalysisConfig;
pub use entropy::run_entropy;
pub use rank::run_rank;
