//! Conditional entropy and information gain
//!
//! For a target T and predictor P over the same N records:
//!
//! ```text
//! H(T | P) = Σ_v (n_v / N) · H(T restricted to P = v)
//! IG(T, P) = H(T) - H(T | P)
//! ```
//!
//! The functions here are generic over the label types so the same code
//! serves species identification (string labels) and age-group prediction
//! (quantile bin ids).

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

use super::entropy::{entropy_from_counts, label_counts, shannon_entropy};
use super::error::{AnalysisError, AnalysisResult};

/// One predictor's contribution to explaining the target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InformationGainRecord {
    /// Name of the predictor column
    pub predictor: String,
    /// H(target | predictor) in bits
    pub conditional_entropy: f64,
    /// H(target) - H(target | predictor) in bits
    pub information_gain: f64,
    /// Number of distinct predictor values the records were split into
    pub partitions: usize,
}

/// Entropy of the full target sequence.
pub fn overall_entropy<T: Eq + Hash>(target: &[T]) -> AnalysisResult<f64> {
    shannon_entropy(target)
}

/// Group record indices by predictor value, in order of first appearance.
fn partition_rows<P: Eq + Hash>(predictor: &[P]) -> Vec<Vec<usize>> {
    let mut index: HashMap<&P, usize> = HashMap::new();
    let mut partitions: Vec<Vec<usize>> = Vec::new();

    for (row, value) in predictor.iter().enumerate() {
        match index.get(value) {
            Some(&slot) => partitions[slot].push(row),
            None => {
                index.insert(value, partitions.len());
                partitions.push(vec![row]);
            }
        }
    }

    partitions
}

/// Weighted average of target entropy inside each predictor partition.
///
/// # Errors
/// - [`AnalysisError::EmptyInput`] when the target is empty
/// - [`AnalysisError::LengthMismatch`] when the sequences differ in length
pub fn conditional_entropy<T, P>(target: &[T], predictor: &[P]) -> AnalysisResult<f64>
where
    T: Eq + Hash,
    P: Eq + Hash,
{
    Ok(conditional_entropy_with_partitions(target, predictor)?.0)
}

/// Conditional entropy and the number of non-empty partitions it was summed over.
fn conditional_entropy_with_partitions<T, P>(
    target: &[T],
    predictor: &[P],
) -> AnalysisResult<(f64, usize)>
where
    T: Eq + Hash,
    P: Eq + Hash,
{
    if target.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }
    if target.len() != predictor.len() {
        return Err(AnalysisError::LengthMismatch {
            target: target.len(),
            predictor: predictor.len(),
        });
    }

    let total = target.len() as f64;
    let partitions = partition_rows(predictor);

    let weighted: f64 = partitions
        .iter()
        .filter(|rows| !rows.is_empty())
        .map(|rows| {
            let subset: Vec<&T> = rows.iter().map(|&r| &target[r]).collect();
            let counts = label_counts(&subset);
            let h = entropy_from_counts(counts.iter().map(|(_, c)| *c));
            (rows.len() as f64 / total) * h
        })
        .sum();

    Ok((weighted, partitions.len()))
}

/// Reduction in target entropy from knowing the predictor.
///
/// Zero for an uninformative predictor, up to floating-point rounding.
pub fn information_gain<T, P>(target: &[T], predictor: &[P]) -> AnalysisResult<f64>
where
    T: Eq + Hash,
    P: Eq + Hash,
{
    let overall = overall_entropy(target)?;
    let conditional = conditional_entropy(target, predictor)?;
    Ok(overall - conditional)
}

/// Build the full record for one predictor against a target whose overall
/// entropy has already been computed.
pub fn gain_record<T, P>(
    name: &str,
    target: &[T],
    overall: f64,
    predictor: &[P],
) -> AnalysisResult<InformationGainRecord>
where
    T: Eq + Hash,
    P: Eq + Hash,
{
    let (conditional, partitions) = conditional_entropy_with_partitions(target, predictor)?;
    Ok(InformationGainRecord {
        predictor: name.to_string(),
        conditional_entropy: conditional,
        information_gain: overall - conditional,
        partitions,
    })
}

/// Gains (and conditional entropies) closer than this rank as ties.
pub const GAIN_TOLERANCE: f64 = 1e-12;

/// Ordering key that snaps a score to a multiple of [`GAIN_TOLERANCE`], so
/// floating-point noise such as `-1e-16` vs `0.0` cannot reorder ties.
pub(crate) fn rank_key(score: f64) -> f64 {
    (score / GAIN_TOLERANCE).round()
}

/// Sort records by information gain, highest first.
///
/// The sort is stable: predictors whose gains agree within
/// [`GAIN_TOLERANCE`] keep their input order.
pub fn sort_by_gain(records: &mut [InformationGainRecord]) {
    records.sort_by(|a, b| {
        rank_key(b.information_gain)
            .partial_cmp(&rank_key(a.information_gain))
            .unwrap_or(Ordering::Equal)
    });
}
