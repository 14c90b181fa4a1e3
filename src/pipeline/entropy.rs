//! Shannon entropy of discrete-valued sequences
//!
//! H(X) = -Σ p(x) · log₂(p(x)), summed over the labels observed in the sequence.
//! Labels can be anything hashable: category strings for character-state
//! matrices, or bin ids produced by the discretizer for measurements.

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

use super::error::{AnalysisError, AnalysisResult};

/// Count occurrences of each distinct label, in order of first appearance.
pub fn label_counts<L: Eq + Hash>(labels: &[L]) -> Vec<(&L, usize)> {
    let mut index: HashMap<&L, usize> = HashMap::with_capacity(labels.len());
    let mut counts: Vec<(&L, usize)> = Vec::new();

    for label in labels {
        match index.get(label) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(label, counts.len());
                counts.push((label, 1));
            }
        }
    }

    counts
}

/// Shannon entropy (bits) of a frequency table.
///
/// Zero counts contribute nothing, so log₂(0) is never evaluated.
/// An all-zero table has entropy 0.
pub fn entropy_from_counts<I>(counts: I) -> f64
where
    I: IntoIterator<Item = usize>,
    I::IntoIter: Clone,
{
    let counts = counts.into_iter();
    let total = counts.clone().sum::<usize>() as f64;

    if total == 0.0 {
        return 0.0;
    }

    counts
        .filter(|&count| count > 0)
        .map(|count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Shannon entropy of a categorical sequence, in bits.
///
/// # Errors
/// [`AnalysisError::EmptyInput`] when the sequence has no observations.
///
/// # Examples
/// ```
/// use morphent::pipeline::shannon_entropy;
///
/// let h = shannon_entropy(&["A", "A", "B", "B"]).unwrap();
/// assert!((h - 1.0).abs() < 1e-12);
/// ```
pub fn shannon_entropy<L: Eq + Hash>(labels: &[L]) -> AnalysisResult<f64> {
    if labels.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let counts = label_counts(labels);
    Ok(entropy_from_counts(counts.iter().map(|(_, c)| *c)))
}

/// Empirical probability of each distinct label, in order of first appearance.
///
/// The probabilities sum to 1.0 within floating-point tolerance.
pub fn probability_distribution<L: Eq + Hash + Clone>(labels: &[L]) -> AnalysisResult<Vec<(L, f64)>> {
    if labels.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let n = labels.len() as f64;
    Ok(label_counts(labels)
        .into_iter()
        .map(|(label, count)| (label.clone(), count as f64 / n))
        .collect())
}

/// Entropy together with the quantities reports need to interpret it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntropySummary {
    /// Number of observations the entropy was computed from
    pub observations: usize,
    /// Number of distinct labels observed
    pub distinct: usize,
    /// Shannon entropy in bits
    pub entropy: f64,
    /// Upper bound log₂(distinct)
    pub max_entropy: f64,
    /// entropy / max_entropy, or 0 when only one label was observed
    pub normalized: f64,
}

/// Compute entropy and its bounds for a categorical sequence.
pub fn summarize<L: Eq + Hash>(labels: &[L]) -> AnalysisResult<EntropySummary> {
    if labels.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let counts = label_counts(labels);
    let distinct = counts.len();
    let entropy = entropy_from_counts(counts.iter().map(|(_, c)| *c));
    let max_entropy = (distinct as f64).log2();
    let normalized = if distinct > 1 { entropy / max_entropy } else { 0.0 };

    Ok(EntropySummary {
        observations: labels.len(),
        distinct,
        entropy,
        max_entropy,
        normalized,
    })
}
