//! Dataset loader for delimited text files

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;

/// Options controlling how a table file is parsed
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Rows used for schema inference; 0 scans the whole file
    pub infer_schema_length: usize,
    /// Cell values treated as missing in every column (e.g. "?" or "NA")
    pub missing_markers: Vec<String>,
}

impl LoadOptions {
    pub fn new(infer_schema_length: usize) -> Self {
        Self {
            infer_schema_length,
            missing_markers: Vec::new(),
        }
    }

    pub fn with_missing_markers(mut self, markers: Vec<String>) -> Self {
        self.missing_markers = markers;
        self
    }
}

/// Field separator for a file, chosen by extension
fn separator_for(path: &Path) -> Result<u8> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "csv" => Ok(b','),
        "tsv" | "tab" => Ok(b'\t'),
        _ => anyhow::bail!(
            "Unsupported file format: '{}'. Supported formats: csv, tsv",
            extension
        ),
    }
}

fn lazy_reader(path: &Path, options: &LoadOptions) -> Result<LazyFrame> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }
    let separator = separator_for(path)?;

    // 0 means full table scan
    let schema_length = if options.infer_schema_length == 0 {
        None
    } else {
        Some(options.infer_schema_length)
    };

    let null_values = if options.missing_markers.is_empty() {
        None
    } else {
        Some(NullValues::AllColumns(
            options
                .missing_markers
                .iter()
                .map(|m| m.as_str().into())
                .collect(),
        ))
    };

    LazyCsvReader::new(path)
        .with_has_header(true)
        .with_separator(separator)
        .with_infer_schema_length(schema_length)
        .with_null_values(null_values)
        .finish()
        .with_context(|| format!("Failed to read table file: {}", path.display()))
}

/// Load a table from a CSV or TSV file.
pub fn load_table(path: &Path, options: &LoadOptions) -> Result<DataFrame> {
    lazy_reader(path, options)?
        .collect()
        .with_context(|| format!("Failed to parse table file: {}", path.display()))
}

/// Column names of a table file, read from its schema only
pub fn get_column_names(path: &Path, options: &LoadOptions) -> Result<Vec<String>> {
    let schema = lazy_reader(path, options)?
        .collect_schema()
        .with_context(|| format!("Failed to read header of {}", path.display()))?;

    Ok(schema.iter_names().map(|name| name.to_string()).collect())
}

/// Column names of an already-loaded DataFrame
pub fn dataframe_columns(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}
