//! Closed scalar interval used as a spline domain.

use super::SplineError;
use num_traits::Float;
use std::fmt;

/// Closed interval `[start, end]` with `start <= end`.
///
/// Intervals are immutable once constructed. Every spline owns its own copy
/// and derives its default uniform knot spacing from it.
///
/// # Example
///
/// ```
/// use lens_core::types::Interval;
///
/// let interval = Interval::new(0.0, 2.0).unwrap();
/// assert_eq!(interval.width(), 2.0);
/// assert_eq!(interval.uniform_spacing(5).unwrap(), 0.5);
///
/// // Reversed bounds are rejected
/// assert!(Interval::new(1.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval<T: Float> {
    start: T,
    end: T,
}

impl<T: Float> Interval<T> {
    /// Construct an interval.
    ///
    /// # Errors
    ///
    /// Returns `SplineError::InvalidInterval` if either bound is non-finite
    /// or `start > end`. A degenerate interval (`start == end`) is accepted.
    pub fn new(start: T, end: T) -> Result<Self, SplineError> {
        if !start.is_finite() || !end.is_finite() || start > end {
            return Err(SplineError::InvalidInterval {
                start: start.to_f64().unwrap_or(f64::NAN),
                end: end.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(Self { start, end })
    }

    /// Lower bound.
    #[inline]
    pub fn start(&self) -> T {
        self.start
    }

    /// Upper bound.
    #[inline]
    pub fn end(&self) -> T {
        self.end
    }

    /// `end - start`.
    #[inline]
    pub fn width(&self) -> T {
        self.end - self.start
    }

    /// Whether `x` lies in `[start, end]`.
    #[inline]
    pub fn contains(&self, x: T) -> bool {
        self.start <= x && x <= self.end
    }

    /// Spacing of `num_knots` evenly distributed knots covering the interval.
    ///
    /// # Errors
    ///
    /// Returns `SplineError::InsufficientKnots` when `num_knots < 2`.
    pub fn uniform_spacing(&self, num_knots: usize) -> Result<T, SplineError> {
        if num_knots < 2 {
            return Err(SplineError::InsufficientKnots {
                got: num_knots,
                need: 2,
            });
        }
        let segments = T::from(num_knots - 1).ok_or(SplineError::InsufficientKnots {
            got: num_knots,
            need: 2,
        })?;
        Ok(self.width() / segments)
    }

    /// Same interval with its bounds replaced, re-validated.
    pub(crate) fn with_bounds(&self, start: T, end: T) -> Result<Self, SplineError> {
        Self::new(start, end)
    }
}

impl<T: Float + fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
