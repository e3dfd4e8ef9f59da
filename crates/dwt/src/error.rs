//! Error types for the dyadic-dwt crate.

use dyadic_extend::ExtendError;

/// Broad classification of a [`DwtError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller passed an argument the transform cannot work with.
    InvalidArgument,
    /// A named item could not be found.
    NotFound,
}

/// Error type for all fallible operations in the dyadic-dwt crate.
///
/// Every error is raised before any computation starts; a failed call never
/// yields a partial result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DwtError {
    /// Returned when the input signal is shorter than the minimum length.
    #[error("signal too short: got {len} samples, need at least {min}")]
    SignalTooShort {
        /// Number of samples provided.
        len: usize,
        /// Minimum number of samples required.
        min: usize,
    },

    /// Returned when a decomposition level below 1 is requested.
    #[error("invalid decomposition level {level}: must be >= 1")]
    InvalidLevel {
        /// Level that was requested.
        level: usize,
    },

    /// Returned when the reconstruction target is not below the
    /// decomposition level.
    #[error("target level must be less than decomposition level: got {target}, level is {level}")]
    TargetLevelTooHigh {
        /// Requested target level.
        target: usize,
        /// Level recorded in the decomposition.
        level: usize,
    },

    /// Returned when a filter set is unusable.
    #[error("invalid filter set: {reason}")]
    InvalidFilter {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when an unsupported wavelet filter name is provided.
    #[error("unsupported wavelet filter: {0}")]
    UnsupportedFilter(String),

    /// Returned when no strategy is registered under the given name.
    #[error("transform strategy not found: {0}")]
    StrategyNotFound(String),

    /// Returned when boundary extension fails.
    #[error("boundary extension failed: {0}")]
    Extend(#[from] ExtendError),
}

impl DwtError {
    /// Returns the broad classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::StrategyNotFound(_) => ErrorKind::NotFound,
            Self::SignalTooShort { .. }
            | Self::InvalidLevel { .. }
            | Self::TargetLevelTooHigh { .. }
            | Self::InvalidFilter { .. }
            | Self::UnsupportedFilter(_)
            | Self::Extend(_) => ErrorKind::InvalidArgument,
        }
    }
}
