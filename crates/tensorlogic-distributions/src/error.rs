//! Error types for tensorlogic-distributions.
//!
//! Construction failures (conflicting or missing parameterizations, out-of-range
//! probabilities under strict validation), evaluation-time shape mismatches and
//! arguments too large to evaluate.

use std::fmt;
use thiserror::Error;

/// Main error type for distribution construction and evaluation
#[derive(Error, Debug)]
pub enum DistributionError {
    /// The distribution could not be built from the supplied parameters
    #[error("Construction error: {0}")]
    Construction(#[from] ConstructionError),

    /// Shapes that cannot be broadcast together
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(ShapeMismatchError),

    /// An argument outside what the operation can handle
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Reasons a distribution constructor rejects its inputs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConstructionError {
    /// Both `probs` and `logits` were passed
    #[error("must pass either probs or logits, not both")]
    BothParameters,

    /// Neither `probs` nor `logits` was passed
    #[error("must pass probs or logits")]
    MissingParameter,

    /// A probability outside `[0, 1]` (or NaN) under strict validation
    #[error("probability {value} at flat index {index} is outside [0, 1]")]
    ProbabilityOutOfRange {
        /// Row-major index of the first offending element
        index: usize,
        /// The offending value
        value: f64,
    },
}

/// Detailed shape mismatch error with context
#[derive(Debug, Clone)]
pub struct ShapeMismatchError {
    /// Description of the operation that failed
    pub operation: String,
    /// Expected shape(s)
    pub expected: Vec<Vec<usize>>,
    /// Actual shape(s) that were provided
    pub actual: Vec<Vec<usize>>,
    /// Additional context
    pub context: Option<String>,
}

impl fmt::Display for ShapeMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Shape mismatch in {}: expected {:?}, got {:?}",
            self.operation, self.expected, self.actual
        )?;
        if let Some(ctx) = &self.context {
            write!(f, " ({})", ctx)?;
        }
        Ok(())
    }
}

impl ShapeMismatchError {
    /// Create a new shape mismatch error
    pub fn new(
        operation: impl Into<String>,
        expected: Vec<Vec<usize>>,
        actual: Vec<Vec<usize>>,
    ) -> Self {
        Self {
            operation: operation.into(),
            expected,
            actual,
            context: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// Result type using DistributionError
pub type DistResult<T> = Result<T, DistributionError>;

impl DistributionError {
    /// Create a shape mismatch error
    pub fn shape_mismatch(
        operation: impl Into<String>,
        expected: Vec<Vec<usize>>,
        actual: Vec<Vec<usize>>,
    ) -> Self {
        DistributionError::ShapeMismatch(ShapeMismatchError::new(operation, expected, actual))
    }

    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        DistributionError::InvalidArgument(msg.into())
    }

    /// Whether this error was raised by a constructor
    pub fn is_construction(&self) -> bool {
        matches!(self, DistributionError::Construction(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_error() {
        let err = DistributionError::shape_mismatch("log_prob", vec![vec![2, 3]], vec![vec![4]]);
        assert!(matches!(err, DistributionError::ShapeMismatch(_)));
        assert!(err.to_string().contains("log_prob"));
        assert!(!err.is_construction());
    }

    #[test]
    fn test_construction_error_conversion() {
        let err: DistributionError = ConstructionError::BothParameters.into();
        assert!(err.is_construction());
        assert_eq!(
            err.to_string(),
            "Construction error: must pass either probs or logits, not both"
        );
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = DistributionError::invalid_argument("sample: 2^64 draws");
        assert!(matches!(err, DistributionError::InvalidArgument(_)));
        assert_eq!(err.to_string(), "Invalid argument: sample: 2^64 draws");
    }

    #[test]
    fn test_out_of_range_display() {
        let err = ConstructionError::ProbabilityOutOfRange {
            index: 2,
            value: 1.5,
        };
        assert_eq!(
            err.to_string(),
            "probability 1.5 at flat index 2 is outside [0, 1]"
        );
    }

    #[test]
    fn test_shape_mismatch_with_context() {
        let err = ShapeMismatchError::new("broadcast", vec![vec![3]], vec![vec![2]])
            .with_context("event against batch shape");
        let err_str = err.to_string();
        assert!(err_str.contains("broadcast"));
        assert!(err_str.contains("event against batch shape"));
    }
}
