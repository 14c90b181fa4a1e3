//! Shared table preparation for the analysis subcommands

use std::path::Path;

use anyhow::Result;
use tracing::info;

use super::config::AnalysisConfig;
use crate::pipeline::{
    get_column_names, load_table, LoadOptions, SkippedColumn, VariableSchema, VariableTable,
};
use crate::utils::{create_spinner, finish_with_success, print_count};

/// Load options for the input table
pub fn load_options(infer_schema_length: usize, config: &AnalysisConfig) -> LoadOptions {
    LoadOptions::new(infer_schema_length).with_missing_markers(config.missing_markers.clone())
}

/// Read the header of `input` and resolve which columns are analysed, and as what kind
pub fn resolve_schema(
    input: &Path,
    options: &LoadOptions,
    config: &AnalysisConfig,
) -> Result<VariableSchema> {
    let available = get_column_names(input, options)?;
    let schema = config.schema(&available)?;
    info!(
        available = available.len(),
        selected = schema.len(),
        "resolved column schema"
    );
    Ok(schema)
}

/// Load `input` and convert the selected columns into typed variables
pub fn load_variables(
    input: &Path,
    options: &LoadOptions,
    schema: &VariableSchema,
) -> Result<VariableTable> {
    let spinner = create_spinner("Loading dataset...");
    let df = load_table(input, options)?;
    finish_with_success(
        &spinner,
        &format!("Loaded {} rows × {} columns", df.height(), df.width()),
    );

    let spinner = create_spinner("Preparing variables...");
    let table = VariableTable::from_dataframe(&df, schema)?;
    finish_with_success(&spinner, "Variables ready");

    let missing: usize = table
        .variables()
        .iter()
        .map(|v| v.values.missing_count())
        .sum();
    print_count(
        "variables",
        table.len(),
        Some(format!("({} missing cells)", missing).as_str()),
    );

    Ok(table)
}

/// Comma-separated names of skipped columns
pub fn skipped_names(skipped: &[SkippedColumn]) -> String {
    skipped
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
