//! Error types for the entropy and information gain engine.
//!
//! Every variant is a deterministic data-quality or usage error. Nothing here
//! is transient, so callers never retry; batch operations skip the failing
//! column and record the error instead.

use thiserror::Error;

/// Errors raised by the entropy, discretization and ranking operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// A sequence has zero observations.
    #[error("input sequence is empty")]
    EmptyInput,

    /// A column has no valid (non-missing) observations where some are required.
    #[error("insufficient data: {what} has no valid observations")]
    InsufficientData {
        /// Human-readable name of the offending column or sequence
        what: String,
    },

    /// The requested number of quantile bins is below 2.
    #[error("invalid bin count {requested}: at least 2 bins are required")]
    InvalidBinCount {
        /// Bin count that was requested
        requested: usize,
    },

    /// Target and predictor sequences do not describe the same records.
    #[error("length mismatch: target has {target} records but predictor has {predictor}")]
    LengthMismatch {
        /// Length of the target sequence
        target: usize,
        /// Length of the predictor sequence
        predictor: usize,
    },

    /// A named column is not present in the table.
    #[error("column '{name}' not found")]
    UnknownColumn {
        /// Requested column name
        name: String,
    },

    /// The target of a ranking must be a categorical variable.
    #[error("target column '{name}' must be categorical")]
    NotCategorical {
        /// Target column name
        name: String,
    },
}

impl AnalysisError {
    /// Shorthand for [`AnalysisError::InsufficientData`].
    pub fn insufficient(what: impl Into<String>) -> Self {
        AnalysisError::InsufficientData { what: what.into() }
    }
}

/// Result alias for the core engine.
pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;
