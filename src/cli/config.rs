//! Analysis configuration: JSON file values merged with command-line options

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::args::TableArgs;
use crate::pipeline::{check_bin_count, VariableKind, VariableSchema, DEFAULT_BIN_COUNT};

/// Settings for one analysis run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub target: Option<String>,
    pub categorical: Vec<String>,
    pub continuous: Vec<String>,
    pub default_kind: Option<VariableKind>,
    pub drop_columns: Vec<String>,
    pub bins: Option<usize>,
    pub missing_markers: Vec<String>,
}

impl AnalysisConfig {
    /// Read a configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Load the config file named by `args` (if any) and apply the
    /// command-line overrides on top.
    pub fn from_args(args: &TableArgs, target: Option<&str>) -> Result<Self> {
        let base = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = base.with_overrides(args, target);
        config.validate()?;
        Ok(config)
    }

    /// Command-line values win over file values whenever they were given
    pub fn with_overrides(mut self, args: &TableArgs, target: Option<&str>) -> Self {
        if let Some(t) = target {
            self.target = Some(t.to_string());
        }
        if !args.categorical.is_empty() {
            self.categorical = args.categorical.clone();
        }
        if !args.continuous.is_empty() {
            self.continuous = args.continuous.clone();
        }
        if args.default_kind.is_some() {
            self.default_kind = args.default_kind;
        }
        if !args.drop_columns.is_empty() {
            self.drop_columns = args.drop_columns.clone();
        }
        if args.bins.is_some() {
            self.bins = args.bins;
        }
        if !args.missing_markers.is_empty() {
            self.missing_markers = args.missing_markers.clone();
        }
        self
    }

    pub fn num_bins(&self) -> usize {
        self.bins.unwrap_or(DEFAULT_BIN_COUNT)
    }

    /// Check values a config file could set outside the CLI validators
    pub fn validate(&self) -> Result<()> {
        check_bin_count(self.num_bins())?;
        Ok(())
    }

    /// Build the variable schema for the columns of a loaded table.
    ///
    /// The target, when set, is always categorical unless explicitly listed
    /// as continuous (which the ranking then rejects).
    pub fn schema(&self, available: &[String]) -> Result<VariableSchema> {
        let mut schema = VariableSchema::resolve(
            available,
            &self.categorical,
            &self.continuous,
            self.default_kind,
            &self.drop_columns,
        )?;

        if let Some(target) = &self.target {
            if !available.contains(target) {
                anyhow::bail!(
                    "Target column '{}' not found in dataset. Available columns: {:?}",
                    target,
                    available
                );
            }
            if self.drop_columns.contains(target) {
                anyhow::bail!("Target column '{}' cannot also be dropped", target);
            }
            if !self.continuous.contains(target) {
                schema.insert(target, VariableKind::Categorical);
            }
        }

        if schema.is_empty() {
            anyhow::bail!(
                "No columns selected. Use --categorical / --continuous or set --default-kind."
            );
        }

        Ok(schema)
    }
}
