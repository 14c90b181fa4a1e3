//! Command-line argument definitions using clap

use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::pipeline::{VariableKind, MIN_BIN_COUNT};

/// Morphent - rank morphological variables by entropy and information gain
#[derive(Parser, Debug)]
#[command(name = "morphent")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase diagnostic logging on stderr (-v info, -vv debug, -vvv trace).
    /// RUST_LOG takes precedence when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Shannon entropy of every selected column
    Entropy {
        #[command(flatten)]
        table: TableArgs,
    },

    /// Rank predictors by information gain about a categorical target column
    Rank {
        /// Target column (species, age group, ...). Always treated as categorical.
        #[arg(short, long)]
        target: Option<String>,

        #[command(flatten)]
        table: TableArgs,
    },
}

/// Options shared by every analysis
#[derive(Args, Debug, Clone)]
pub struct TableArgs {
    /// Input file path (CSV or TSV)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Columns to treat as categorical (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub categorical: Vec<String>,

    /// Columns to treat as continuous measurements (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub continuous: Vec<String>,

    /// Kind applied to columns not listed in --categorical or --continuous.
    /// Options: "categorical", "continuous". Unlisted columns are ignored when omitted.
    #[arg(long)]
    pub default_kind: Option<VariableKind>,

    /// Columns to drop before analysis (comma-separated), e.g. specimen ids
    #[arg(long, value_delimiter = ',')]
    pub drop_columns: Vec<String>,

    /// Number of quantile bins for continuous columns [default: 6]
    #[arg(short, long, value_parser = validate_bins)]
    pub bins: Option<usize>,

    /// Cell values read as missing (comma-separated), e.g. "?,NA"
    #[arg(long, value_delimiter = ',')]
    pub missing_markers: Vec<String>,

    /// Number of rows to use for schema inference.
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// JSON configuration file. Explicit command-line options override its values.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write results as JSON. Without a path, writes next to the input
    /// with an '_entropy.json' or '_ranking.json' suffix.
    #[arg(short, long, num_args = 0..=1)]
    pub export: Option<Option<PathBuf>>,

    /// Only display the first N rows of the result table
    #[arg(long)]
    pub top: Option<usize>,
}

impl TableArgs {
    /// Resolve the JSON export path, deriving it from the input if needed.
    /// `None` when no export was requested.
    pub fn export_path(&self, suffix: &str) -> Option<PathBuf> {
        match &self.export {
            None => None,
            Some(Some(path)) => Some(path.clone()),
            Some(None) => Some(derived_path(&self.input, suffix)),
        }
    }
}

/// `<dir>/<stem>_<suffix>.json` for a given input file
pub fn derived_path(input: &Path, suffix: &str) -> PathBuf {
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    parent.join(format!("{}_{}.json", stem, suffix))
}

/// Validator for the bin count
fn validate_bins(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid bin count", s))?;

    if value < MIN_BIN_COUNT {
        Err(format!(
            "bins must be at least {}, got {}",
            MIN_BIN_COUNT, value
        ))
    } else {
        Ok(value)
    }
}
