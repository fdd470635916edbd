//! Error types for motion analysis

use thiserror::Error;

/// Result type alias for motion analysis operations
pub type MotionResult<T> = Result<T, MotionError>;

/// Errors that can occur during motion analysis
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MotionError {
    /// Signal with zero dynamic range passed to normalization
    #[error("degenerate signal: min {min} and max {max} leave no range to normalize")]
    DegenerateSignal {
        /// Smallest sample
        min: f64,
        /// Largest sample
        max: f64,
    },

    /// Sequence too short for the requested operation
    #[error("{operation}: need at least {required} samples, got {actual}")]
    InsufficientLength {
        /// Operation that rejected the input
        operation: &'static str,
        /// Minimum accepted length
        required: usize,
        /// Length that was supplied
        actual: usize,
    },

    /// Summarizer called with no points
    #[error("empty input: no points to summarize")]
    EmptyInput,

    /// Sequence length violates a structural requirement
    #[error("{operation}: invalid length {length}")]
    InvalidLength {
        /// Operation that rejected the input
        operation: &'static str,
        /// Length that was supplied
        length: usize,
    },

    /// NaN or infinity encountered
    #[error("non-finite value at index {index} during {stage}")]
    NonFiniteValue {
        /// Pipeline stage that produced or received the value
        stage: &'static str,
        /// Position of the first offending value
        index: usize,
    },

    /// Configuration out of range
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl MotionError {
    /// Build an [`MotionError::InsufficientLength`]
    #[must_use]
    pub const fn insufficient(operation: &'static str, required: usize, actual: usize) -> Self {
        Self::InsufficientLength {
            operation,
            required,
            actual,
        }
    }
}

/// Return the first non-finite value in `values` as an error.
pub(crate) fn ensure_finite(values: &[f64], stage: &'static str) -> MotionResult<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(MotionError::NonFiniteValue { stage, index }),
        None => Ok(()),
    }
}
