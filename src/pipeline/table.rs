//! Typed variable table built from a loaded DataFrame
//!
//! The caller decides which columns are categorical and which are
//! continuous; nothing is inferred from the data. Each selected column is
//! materialised into an owned sequence so the analysis code never touches
//! polars directly.

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::discretize::discretize;
use super::error::{AnalysisError, AnalysisResult};

/// How a column's values are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    /// Discrete labels compared by exact equality
    Categorical,
    /// Real-valued measurements, discretized into quantile bins before use
    Continuous,
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableKind::Categorical => write!(f, "categorical"),
            VariableKind::Continuous => write!(f, "continuous"),
        }
    }
}

impl FromStr for VariableKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "categorical" | "cat" => Ok(VariableKind::Categorical),
            "continuous" | "cont" => Ok(VariableKind::Continuous),
            _ => Err(format!(
                "Unknown variable kind: '{}'. Use 'categorical' or 'continuous'.",
                s
            )),
        }
    }
}

/// Column values, tagged by kind. `None` marks a missing observation.
#[derive(Debug, Clone, PartialEq)]
pub enum VariableValues {
    Categorical(Vec<Option<String>>),
    Continuous(Vec<Option<f64>>),
}

impl VariableValues {
    pub fn kind(&self) -> VariableKind {
        match self {
            VariableValues::Categorical(_) => VariableKind::Categorical,
            VariableValues::Continuous(_) => VariableKind::Continuous,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            VariableValues::Categorical(v) => v.len(),
            VariableValues::Continuous(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of missing observations (null, or NaN/±inf for measurements)
    pub fn missing_count(&self) -> usize {
        match self {
            VariableValues::Categorical(v) => v.iter().filter(|x| x.is_none()).count(),
            VariableValues::Continuous(v) => v
                .iter()
                .filter(|x| x.map_or(true, |f| !f.is_finite()))
                .count(),
        }
    }

    /// Keep only the given rows, in the given order.
    pub fn select(&self, rows: &[usize]) -> VariableValues {
        match self {
            VariableValues::Categorical(v) => {
                VariableValues::Categorical(rows.iter().map(|&r| v[r].clone()).collect())
            }
            VariableValues::Continuous(v) => {
                VariableValues::Continuous(rows.iter().map(|&r| v[r]).collect())
            }
        }
    }

    /// Partition key for every observation.
    ///
    /// Categorical labels are used as-is; measurements are replaced by their
    /// quantile bin id. Missing observations share the [`PartitionKey::Missing`] key.
    pub fn partition_keys(&self, num_bins: usize) -> AnalysisResult<Vec<PartitionKey<'_>>> {
        match self {
            VariableValues::Categorical(v) => Ok(v
                .iter()
                .map(|label| match label {
                    Some(s) => PartitionKey::Label(s.as_str()),
                    None => PartitionKey::Missing,
                })
                .collect()),
            VariableValues::Continuous(v) => {
                let discretization = discretize(v, num_bins)?;
                Ok(discretization
                    .bins
                    .into_iter()
                    .map(|bin| match bin {
                        Some(id) => PartitionKey::Bin(id),
                        None => PartitionKey::Missing,
                    })
                    .collect())
            }
        }
    }
}

/// Value a record is grouped by when partitioning on a predictor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartitionKey<'a> {
    Missing,
    Label(&'a str),
    Bin(usize),
}

impl PartitionKey<'_> {
    pub fn is_missing(&self) -> bool {
        matches!(self, PartitionKey::Missing)
    }
}

/// A named column
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub values: VariableValues,
}

impl Variable {
    /// Categorical column from optional labels
    pub fn categorical<I, S>(name: &str, labels: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            values: VariableValues::Categorical(
                labels.into_iter().map(|l| l.map(Into::into)).collect(),
            ),
        }
    }

    /// Continuous column from optional measurements; NaN and ±inf are stored as missing
    pub fn continuous<I>(name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        Self {
            name: name.to_string(),
            values: VariableValues::Continuous(
                values
                    .into_iter()
                    .map(|v| v.filter(|x| x.is_finite()))
                    .collect(),
            ),
        }
    }

    pub fn kind(&self) -> VariableKind {
        self.values.kind()
    }
}

/// Caller-supplied variable types for the columns to analyze
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableSchema {
    columns: Vec<(String, VariableKind)>,
}

impl VariableSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or re-tag a column
    pub fn with(mut self, name: &str, kind: VariableKind) -> Self {
        self.insert(name, kind);
        self
    }

    pub fn with_categorical(self, name: &str) -> Self {
        self.with(name, VariableKind::Categorical)
    }

    pub fn with_continuous(self, name: &str) -> Self {
        self.with(name, VariableKind::Continuous)
    }

    pub fn insert(&mut self, name: &str, kind: VariableKind) {
        match self.columns.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = kind,
            None => self.columns.push((name.to_string(), kind)),
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.columns.retain(|(n, _)| n != name);
    }

    pub fn kind_of(&self, name: &str) -> Option<VariableKind> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, k)| *k)
    }

    pub fn columns(&self) -> &[(String, VariableKind)] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Build a schema from explicit column lists.
    ///
    /// Columns of `available` that are in neither list take `default_kind`
    /// (and are left out when it is `None`). Dropped columns are excluded
    /// even when listed.
    pub fn resolve(
        available: &[String],
        categorical: &[String],
        continuous: &[String],
        default_kind: Option<VariableKind>,
        drop: &[String],
    ) -> Result<Self> {
        let mut schema = Self::new();

        for name in categorical.iter().chain(continuous.iter()) {
            if !available.contains(name) {
                anyhow::bail!(
                    "Column '{}' not found in dataset. Available columns: {:?}",
                    name,
                    available
                );
            }
        }

        if let Some(both) = categorical.iter().find(|c| continuous.contains(c)) {
            anyhow::bail!(
                "Column '{}' is listed as both categorical and continuous",
                both
            );
        }

        for name in available {
            if drop.contains(name) {
                continue;
            }
            let kind = if categorical.contains(name) {
                Some(VariableKind::Categorical)
            } else if continuous.contains(name) {
                Some(VariableKind::Continuous)
            } else {
                default_kind
            };
            if let Some(kind) = kind {
                schema.insert(name, kind);
            }
        }

        Ok(schema)
    }
}

/// Columns materialised as typed sequences of equal length
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableTable {
    variables: Vec<Variable>,
    rows: usize,
}

impl VariableTable {
    /// Build a table from variables that all have the same length.
    pub fn new(variables: Vec<Variable>) -> Result<Self> {
        let rows = variables.first().map(|v| v.values.len()).unwrap_or(0);
        if let Some(bad) = variables.iter().find(|v| v.values.len() != rows) {
            anyhow::bail!(
                "Column '{}' has {} rows, expected {}",
                bad.name,
                bad.values.len(),
                rows
            );
        }
        Ok(Self { variables, rows })
    }

    /// Convert the schema's columns of a DataFrame into typed sequences.
    ///
    /// Categorical columns are cast to strings and continuous columns to
    /// Float64; values that fail to cast become missing.
    pub fn from_dataframe(df: &DataFrame, schema: &VariableSchema) -> Result<Self> {
        let mut variables = Vec::with_capacity(schema.len());

        for (name, kind) in schema.columns() {
            let column = df.column(name).with_context(|| {
                format!(
                    "Column '{}' not found. Available columns: {:?}",
                    name,
                    df.get_column_names()
                )
            })?;

            let variable = match kind {
                VariableKind::Categorical => {
                    let cast = column
                        .cast(&DataType::String)
                        .with_context(|| format!("Failed to read '{}' as categorical", name))?;
                    let labels = cast.str()?;
                    Variable::categorical(name, labels.iter().map(|l| l.map(str::to_string)))
                }
                VariableKind::Continuous => {
                    let cast = column.cast(&DataType::Float64).with_context(|| {
                        format!("Column '{}' must be numeric to be continuous", name)
                    })?;
                    let values = cast.f64()?;
                    Variable::continuous(name, values.iter())
                }
            };

            variables.push(variable);
        }

        Self::new(variables)
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.variables.iter().map(|v| v.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Look up a column, failing with [`AnalysisError::UnknownColumn`].
    pub fn require(&self, name: &str) -> AnalysisResult<&Variable> {
        self.get(name).ok_or_else(|| AnalysisError::UnknownColumn {
            name: name.to_string(),
        })
    }
}
