//! Table-level entropy and information gain analyses
//!
//! Both analyses run per column in parallel with rayon. A column that
//! cannot be analyzed (for example, all values missing) is recorded in the
//! `skipped` list instead of failing the whole run.

use std::cmp::Ordering;
use std::collections::HashMap;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use super::discretize::check_bin_count;
use super::entropy::{summarize, EntropySummary};
use super::error::{AnalysisError, AnalysisResult};
use super::gain::{gain_record, overall_entropy, rank_key, sort_by_gain, InformationGainRecord};
use super::table::{Variable, VariableKind, VariableTable, VariableValues};

/// A column that was left out of an analysis, and why
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedColumn {
    pub name: String,
    pub reason: String,
}

/// Unconditional entropy of one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnEntropy {
    pub name: String,
    pub kind: VariableKind,
    /// Observations ignored because they were missing
    pub missing: usize,
    #[serde(flatten)]
    pub summary: EntropySummary,
}

/// Per-column entropies, highest first
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntropyReport {
    pub num_bins: usize,
    pub columns: Vec<ColumnEntropy>,
    pub skipped: Vec<SkippedColumn>,
}

impl EntropyReport {
    /// Entropy of a named column, if it was analyzed
    pub fn entropy_of(&self, name: &str) -> Option<f64> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.summary.entropy)
    }

    /// Column name → entropy
    pub fn to_map(&self) -> HashMap<String, f64> {
        self.columns
            .iter()
            .map(|c| (c.name.clone(), c.summary.entropy))
            .collect()
    }
}

/// Information gain of every predictor for one target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    pub target: String,
    pub num_bins: usize,
    /// Records the target entropy was computed from (missing targets excluded)
    pub records_used: usize,
    pub overall_entropy: f64,
    /// Sorted by information gain, highest first
    pub records: Vec<InformationGainRecord>,
    pub skipped: Vec<SkippedColumn>,
}

impl Ranking {
    /// The predictor that explains the target best
    pub fn most_informative(&self) -> Option<&InformationGainRecord> {
        self.records.first()
    }

    /// Records ordered by ascending conditional entropy.
    ///
    /// Because the target entropy is shared, this is the same order as
    /// [`Ranking::records`].
    pub fn by_conditional_entropy(&self) -> Vec<&InformationGainRecord> {
        let mut ordered: Vec<&InformationGainRecord> = self.records.iter().collect();
        ordered.sort_by(|a, b| {
            rank_key(a.conditional_entropy)
                .partial_cmp(&rank_key(b.conditional_entropy))
                .unwrap_or(Ordering::Equal)
        });
        ordered
    }

    pub fn get(&self, predictor: &str) -> Option<&InformationGainRecord> {
        self.records.iter().find(|r| r.predictor == predictor)
    }
}

/// Entropy of a single column, ignoring missing observations.
///
/// Continuous columns are discretized into `num_bins` quantile bins first.
pub fn column_entropy(variable: &Variable, num_bins: usize) -> AnalysisResult<ColumnEntropy> {
    if variable.values.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let missing = variable.values.missing_count();
    let keys = variable
        .values
        .partition_keys(num_bins)
        .map_err(|e| name_insufficient(e, &variable.name))?;

    let present: Vec<_> = keys.into_iter().filter(|k| !k.is_missing()).collect();
    if present.is_empty() {
        return Err(AnalysisError::insufficient(&variable.name));
    }

    Ok(ColumnEntropy {
        name: variable.name.clone(),
        kind: variable.kind(),
        missing,
        summary: summarize(&present)?,
    })
}

/// Entropy of every column in the table, sorted descending (stable).
///
/// # Errors
/// [`AnalysisError::InvalidBinCount`] when `num_bins < 2`. Per-column
/// failures are reported in [`EntropyReport::skipped`].
pub fn column_entropies(table: &VariableTable, num_bins: usize) -> AnalysisResult<EntropyReport> {
    check_bin_count(num_bins)?;

    let results: Vec<(String, AnalysisResult<ColumnEntropy>)> = table
        .variables()
        .par_iter()
        .map(|variable| (variable.name.clone(), column_entropy(variable, num_bins)))
        .collect();

    let mut columns = Vec::new();
    let mut skipped = Vec::new();
    for (name, result) in results {
        match result {
            Ok(entry) => {
                debug!(column = %name, entropy = entry.summary.entropy, "column entropy");
                columns.push(entry);
            }
            Err(e) => {
                warn!(column = %name, error = %e, "skipping column");
                skipped.push(SkippedColumn {
                    name,
                    reason: e.to_string(),
                });
            }
        }
    }

    columns.sort_by(|a, b| {
        b.summary
            .entropy
            .partial_cmp(&a.summary.entropy)
            .unwrap_or(Ordering::Equal)
    });

    Ok(EntropyReport {
        num_bins,
        columns,
        skipped,
    })
}

/// Target labels for the rows where the target is present.
///
/// Returns the kept row indices and the labels in the same order.
fn present_target(variable: &Variable) -> AnalysisResult<(Vec<usize>, Vec<&str>)> {
    let labels = match &variable.values {
        VariableValues::Categorical(labels) => labels,
        VariableValues::Continuous(_) => {
            return Err(AnalysisError::NotCategorical {
                name: variable.name.clone(),
            })
        }
    };

    Ok(labels
        .iter()
        .enumerate()
        .filter_map(|(row, label)| label.as_deref().map(|l| (row, l)))
        .unzip())
}

/// Information gain of one predictor about the target.
///
/// Rows with a missing target are excluded. Missing predictor values form
/// their own partition.
///
/// # Errors
/// - [`AnalysisError::EmptyInput`] when no row has a target label
/// - [`AnalysisError::InsufficientData`] when the predictor is missing on every such row
pub fn predictor_gain(
    target: &Variable,
    predictor: &Variable,
    num_bins: usize,
) -> AnalysisResult<InformationGainRecord> {
    check_bin_count(num_bins)?;

    let (rows, labels) = present_target(target)?;
    let overall = overall_entropy(&labels)?;
    score_predictor(&rows, &labels, overall, predictor, num_bins)
}

fn score_predictor(
    rows: &[usize],
    labels: &[&str],
    overall: f64,
    predictor: &Variable,
    num_bins: usize,
) -> AnalysisResult<InformationGainRecord> {
    let values = predictor.values.select(rows);
    let keys = values
        .partition_keys(num_bins)
        .map_err(|e| name_insufficient(e, &predictor.name))?;

    if keys.iter().all(|k| k.is_missing()) {
        return Err(AnalysisError::insufficient(&predictor.name));
    }

    gain_record(&predictor.name, labels, overall, &keys)
}

/// Rank every non-target column by information gain about `target`.
///
/// # Errors
/// - [`AnalysisError::InvalidBinCount`] when `num_bins < 2`
/// - [`AnalysisError::UnknownColumn`] / [`AnalysisError::NotCategorical`] for a bad target
/// - [`AnalysisError::EmptyInput`] when every target label is missing
///
/// Predictors that fail are reported in [`Ranking::skipped`].
pub fn rank_predictors(
    table: &VariableTable,
    target: &str,
    num_bins: usize,
) -> AnalysisResult<Ranking> {
    check_bin_count(num_bins)?;

    let target_var = table.require(target)?;
    let (rows, labels) = present_target(target_var)?;
    let overall = overall_entropy(&labels)?;
    debug!(column = %target, records = rows.len(), overall, "target entropy");

    let results: Vec<(String, AnalysisResult<InformationGainRecord>)> = table
        .variables()
        .par_iter()
        .filter(|v| v.name != target)
        .map(|predictor| {
            let result = score_predictor(&rows, &labels, overall, predictor, num_bins);
            (predictor.name.clone(), result)
        })
        .collect();

    let mut records = Vec::new();
    let mut skipped = Vec::new();
    for (name, result) in results {
        match result {
            Ok(record) => {
                debug!(
                    predictor = %name,
                    gain = record.information_gain,
                    conditional = record.conditional_entropy,
                    "information gain"
                );
                records.push(record);
            }
            Err(e) => {
                warn!(predictor = %name, error = %e, "skipping predictor");
                skipped.push(SkippedColumn {
                    name,
                    reason: e.to_string(),
                });
            }
        }
    }

    sort_by_gain(&mut records);

    Ok(Ranking {
        target: target.to_string(),
        num_bins,
        records_used: rows.len(),
        overall_entropy: overall,
        records,
        skipped,
    })
}

/// Attach the column name to an "insufficient data" error from the discretizer.
fn name_insufficient(error: AnalysisError, name: &str) -> AnalysisError {
    match error {
        AnalysisError::InsufficientData { .. } | AnalysisError::EmptyInput => {
            AnalysisError::insufficient(name)
        }
        other => other,
    }
}
