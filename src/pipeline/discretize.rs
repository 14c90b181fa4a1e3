//! Quantile discretization of continuous measurements
//!
//! A measurement column is cut into `k` ordinal bins at the empirical
//! quantiles `0, 1/k, …, 1` of its non-missing values. Bin ids run from 1
//! to `k`. A value sitting exactly on a breakpoint belongs to the lower bin,
//! and the lowest breakpoint is inclusive so the minimum is always binned.

use serde::Serialize;

use super::error::{AnalysisError, AnalysisResult};

/// Default number of quantile bins
pub const DEFAULT_BIN_COUNT: usize = 6;

/// Smallest bin count that still discriminates anything
pub const MIN_BIN_COUNT: usize = 2;

/// Result of discretizing one continuous sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Discretization {
    /// k + 1 non-decreasing quantile breakpoints
    pub breakpoints: Vec<f64>,
    /// Bin id per observation, `None` for missing observations
    pub bins: Vec<Option<usize>>,
}

impl Discretization {
    /// Requested number of bins (k)
    pub fn num_bins(&self) -> usize {
        self.breakpoints.len().saturating_sub(1)
    }

    /// Number of observations in each bin, indexed by `bin id - 1`
    pub fn bin_counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.num_bins()];
        for bin in self.bins.iter().flatten() {
            counts[bin - 1] += 1;
        }
        counts
    }

    /// Bins that received at least one observation.
    ///
    /// Can be smaller than [`num_bins`](Self::num_bins) when ties collapse breakpoints.
    pub fn effective_bins(&self) -> usize {
        self.bin_counts().iter().filter(|&&c| c > 0).count()
    }

    /// Number of observations that were assigned no bin
    pub fn missing(&self) -> usize {
        self.bins.iter().filter(|b| b.is_none()).count()
    }
}

/// Validate a requested bin count.
pub fn check_bin_count(num_bins: usize) -> AnalysisResult<()> {
    if num_bins < MIN_BIN_COUNT {
        return Err(AnalysisError::InvalidBinCount { requested: num_bins });
    }
    Ok(())
}

/// Linear-interpolation quantile of an ascending, non-empty slice.
///
/// The probability is given as the fraction `num / den` so that the rank
/// `(n - 1) · num / den` is exact whenever it is an integer.
fn quantile_sorted(sorted: &[f64], num: usize, den: usize) -> f64 {
    let last = sorted.len() - 1;
    let h = (last * num.min(den)) as f64 / den as f64;
    let lo = h.floor() as usize;

    if lo >= last {
        return sorted[last];
    }

    let frac = h - lo as f64;
    if frac == 0.0 {
        return sorted[lo];
    }
    sorted[lo] + frac * (sorted[lo + 1] - sorted[lo])
}

/// Compute the k + 1 quantile breakpoints of the given values.
///
/// Non-finite values (NaN, ±inf) are ignored.
///
/// # Errors
/// - [`AnalysisError::InvalidBinCount`] when `num_bins < 2`
/// - [`AnalysisError::EmptyInput`] when no finite value is present
pub fn quantile_breakpoints(values: &[f64], num_bins: usize) -> AnalysisResult<Vec<f64>> {
    check_bin_count(num_bins)?;

    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mut breakpoints: Vec<f64> = (0..=num_bins)
        .map(|i| quantile_sorted(&sorted, i, num_bins))
        .collect();

    // Interpolation rounding must never make the sequence decrease
    for i in 1..breakpoints.len() {
        if breakpoints[i] < breakpoints[i - 1] {
            breakpoints[i] = breakpoints[i - 1];
        }
    }

    Ok(breakpoints)
}

/// Bin id (1-based) for a value given breakpoints, or `None` when the value is
/// missing, non-finite, or lies outside `[breakpoints[0], breakpoints[k]]`.
pub fn assign_bin(value: f64, breakpoints: &[f64]) -> Option<usize> {
    if !value.is_finite() || breakpoints.len() < 2 {
        return None;
    }

    let first = breakpoints[0];
    let last = breakpoints[breakpoints.len() - 1];
    if value < first || value > last {
        return None;
    }

    // First upper edge that is >= value; ties land in the lower bin
    let upper_edges = &breakpoints[1..];
    Some(upper_edges.partition_point(|&edge| edge < value) + 1)
}

/// Discretize a continuous sequence into `num_bins` quantile bins.
///
/// # Errors
/// - [`AnalysisError::InvalidBinCount`] when `num_bins < 2`
/// - [`AnalysisError::EmptyInput`] when the sequence is empty
/// - [`AnalysisError::InsufficientData`] when every value is missing
pub fn discretize(values: &[Option<f64>], num_bins: usize) -> AnalysisResult<Discretization> {
    check_bin_count(num_bins)?;

    if values.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let present: Vec<f64> = values
        .iter()
        .filter_map(|v| v.filter(|x| x.is_finite()))
        .collect();

    if present.is_empty() {
        return Err(AnalysisError::insufficient("continuous sequence"));
    }

    let breakpoints = quantile_breakpoints(&present, num_bins)?;
    let bins = values
        .iter()
        .map(|v| v.and_then(|x| assign_bin(x, &breakpoints)))
        .collect();

    Ok(Discretization { breakpoints, bins })
}
