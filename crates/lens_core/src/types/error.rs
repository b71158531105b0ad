//! Error types for structured error handling.
//!
//! This module provides:
//! - `SplineError`: Errors from spline construction, knot specification and evaluation
//! - `SimplexError`: Errors from simplex solver construction and candidate evaluation
//! - `FitError`: Errors from least-squares spline fitting

use thiserror::Error;

/// Spline-related errors.
///
/// Provides structured error handling for spline construction, knot
/// specification, coefficient generation and evaluation.
///
/// # Variants
/// - `InvalidInterval`: Interval bounds are non-finite or reversed
/// - `InsufficientKnots`: Fewer knots than the spline needs
/// - `KnotLengthMismatch`: x and y knot sequences differ in length
/// - `NonIncreasingKnots`: Knot x-positions are not strictly increasing
/// - `KnotOutOfRange`: Knot index outside `[0, num_knots)`
/// - `CoefficientLengthMismatch`: Explicit coefficients do not match the knot count
/// - `KnotCountMismatch`: Arithmetic between splines with different knot counts
/// - `DivisionByZero`: Knot values divided by zero
/// - `NonUniform`: Uniform-only code path used on a non-uniform spline
/// - `DegenerateCurvature`: Curvature weights cannot be normalised
/// - `NonFiniteCoefficients`: Generation produced NaN or infinite coefficients
///
/// # Examples
/// ```
/// use lens_core::types::SplineError;
///
/// let err = SplineError::InsufficientKnots { got: 1, need: 2 };
/// assert_eq!(format!("{}", err), "Insufficient knots: got 1, need at least 2");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SplineError {
    /// Interval bounds are non-finite or `start > end`.
    #[error("Invalid interval [{start}, {end}]")]
    InvalidInterval {
        /// Lower bound
        start: f64,
        /// Upper bound
        end: f64,
    },

    /// Fewer knots than required.
    #[error("Insufficient knots: got {got}, need at least {need}")]
    InsufficientKnots {
        /// Number of knots provided
        got: usize,
        /// Minimum number of knots required
        need: usize,
    },

    /// x and y knot sequences have different lengths.
    #[error("Knot sequences differ in length: {xs} x-values, {ys} y-values")]
    KnotLengthMismatch {
        /// Number of x-values
        xs: usize,
        /// Number of y-values
        ys: usize,
    },

    /// Knot x-positions are not strictly increasing.
    #[error("Knot x-positions not strictly increasing at index {index}")]
    NonIncreasingKnots {
        /// First index violating the ordering
        index: usize,
    },

    /// Knot index outside the valid range.
    #[error("Knot index {index} out of range for {len} knots")]
    KnotOutOfRange {
        /// Requested index
        index: usize,
        /// Number of knots
        len: usize,
    },

    /// Explicit coefficient array has the wrong length.
    #[error("Expected {expected} polynomial coefficients, got {got}")]
    CoefficientLengthMismatch {
        /// Required length, `3 * (num_knots - 1)`
        expected: usize,
        /// Provided length
        got: usize,
    },

    /// Pairwise knot arithmetic on splines with different knot counts.
    #[error("Knot count mismatch: {left} vs {right}")]
    KnotCountMismatch {
        /// Knots of the left operand
        left: usize,
        /// Knots of the right operand
        right: usize,
    },

    /// Knot values divided by zero.
    #[error("Division of knot values by zero")]
    DivisionByZero,

    /// A uniform-only code path was used on a non-uniform spline.
    #[error("Spline is not uniform")]
    NonUniform,

    /// Curvature weights sum to a zero normalisation denominator.
    #[error("Curvature weights are degenerate: normalisation denominator is zero")]
    DegenerateCurvature,

    /// Coefficient generation produced NaN or infinite values.
    #[error("Non-finite polynomial coefficients in segment {segment}")]
    NonFiniteCoefficients {
        /// Segment whose coefficients are not finite
        segment: usize,
    },
}

/// Simplex solver errors.
///
/// # Variants
/// - `EmptyArgument`: Zero-dimensional argument (single-point simplex)
/// - `InvalidStep`: Initial step size is zero or non-finite
/// - `InvalidTolerance`: Plateau tolerance is negative or non-finite
/// - `PreCompute`: The objective's pre-computation hook failed for a candidate
///
/// # Examples
/// ```
/// use lens_core::types::SimplexError;
///
/// let err = SimplexError::EmptyArgument;
/// assert!(format!("{}", err).contains("zero-dimensional"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimplexError {
    /// The starting argument has dimension zero.
    #[error("Cannot build a simplex over a zero-dimensional argument")]
    EmptyArgument,

    /// Initial step size is zero or non-finite.
    #[error("Invalid simplex step size: {0}")]
    InvalidStep(f64),

    /// Plateau tolerance is negative or non-finite.
    #[error("Invalid simplex tolerance: {0}")]
    InvalidTolerance(f64),

    /// Pre-computation for a candidate argument failed.
    #[error("Pre-computation failed: {0}")]
    PreCompute(String),
}

impl From<SplineError> for SimplexError {
    fn from(err: SplineError) -> Self {
        SimplexError::PreCompute(err.to_string())
    }
}

/// Spline fitting errors.
///
/// Wraps the spline and solver errors a fit can run into, plus sample
/// validation failures.
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FitError {
    /// No samples to fit.
    #[error("No samples to fit")]
    NoSamples,

    /// Sample x and y sequences differ in length.
    #[error("Sample sequences differ in length: {xs} x-values, {ys} y-values")]
    SampleLengthMismatch {
        /// Number of x-values
        xs: usize,
        /// Number of y-values
        ys: usize,
    },

    /// Spline construction or generation failed.
    #[error("Spline error: {0}")]
    Spline(#[from] SplineError),

    /// Solver construction or iteration failed.
    #[error("Solver error: {0}")]
    Simplex(#[from] SimplexError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spline_error_display() {
        let err = SplineError::KnotOutOfRange { index: 5, len: 3 };
        assert_eq!(format!("{}", err), "Knot index 5 out of range for 3 knots");

        let err = SplineError::NonIncreasingKnots { index: 2 };
        assert!(format!("{}", err).contains("index 2"));

        let err = SplineError::NonUniform;
        assert_eq!(format!("{}", err), "Spline is not uniform");
    }

    #[test]
    fn test_spline_error_invalid_interval_display() {
        let err = SplineError::InvalidInterval {
            start: 2.0,
            end: 1.0,
        };
        assert_eq!(format!("{}", err), "Invalid interval [2, 1]");
    }

    #[test]
    fn test_simplex_error_display() {
        let err = SimplexError::InvalidStep(0.0);
        assert_eq!(format!("{}", err), "Invalid simplex step size: 0");

        let err = SimplexError::InvalidTolerance(-1.0);
        assert!(format!("{}", err).contains("-1"));
    }

    #[test]
    fn test_spline_error_converts_to_pre_compute() {
        let err: SimplexError = SplineError::DegenerateCurvature.into();
        match err {
            SimplexError::PreCompute(msg) => assert!(msg.contains("degenerate")),
            _ => panic!("Expected PreCompute error"),
        }
    }

    #[test]
    fn test_errors_are_std_errors() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&SplineError::DivisionByZero);
        assert_error(&SimplexError::EmptyArgument);
        assert_error(&FitError::NoSamples);
    }

    #[test]
    fn test_fit_error_wraps_sources() {
        let err: FitError = SplineError::NonUniform.into();
        assert_eq!(format!("{}", err), "Spline error: Spline is not uniform");

        let err: FitError = SimplexError::EmptyArgument.into();
        assert!(matches!(err, FitError::Simplex(SimplexError::EmptyArgument)));
    }
}
