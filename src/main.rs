//! Morphent: entropy and information gain CLI
//!
//! Ranks the variables of a morphological table by Shannon entropy, and
//! ranks predictors by how much information they carry about a target.

use anyhow::Result;
use clap::Parser;

use morphent::cli::{run_entropy, run_rank, Cli, Commands};
use morphent::utils::init_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Entropy { table } => run_entropy(table),
        Commands::Rank { target, table } => run_rank(target.as_deref(), table),
    }
}
