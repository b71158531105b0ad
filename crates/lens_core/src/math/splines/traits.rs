//! Spline trait definition.

use super::knots::{Knots, QuadraticSegment};
use crate::traits::Scalar;
use crate::types::{Interval, SplineError};
use std::fmt;

/// Common contract of the piecewise-quadratic spline family.
///
/// A spline owns its knots, its knot values and one quadratic per segment.
/// Coefficients are computed only by [`Spline::generate`]; after any call to
/// [`Spline::specify`] or [`Spline::specify_x`] they are stale until the next
/// successful `generate`.
///
/// The trait is object safe. [`Spline::box_clone`] provides the owned deep
/// copy through the common interface, and `Box<dyn Spline<T>>` implements
/// `Clone` on top of it.
///
/// # Domain
///
/// Evaluation outside the knot range is clamped, not an error: `compute`
/// returns the boundary value of the spline on the respective side.
///
/// # Example
///
/// ```
/// use lens_core::math::splines::{QuadraticSpline, Spline};
///
/// let mut spline = QuadraticSpline::with_knots(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 0.0]).unwrap();
/// spline.generate().unwrap();
///
/// let copy: Box<dyn Spline<f64>> = spline.box_clone();
/// assert_eq!(copy.compute(1.0).unwrap(), 1.0);
/// assert_eq!(copy.compute(5.0).unwrap(), 0.0); // clamped to the last knot
/// ```
pub trait Spline<T: Scalar>: fmt::Debug + Send + Sync {
    /// Knot storage backing this spline.
    fn knots(&self) -> &Knots<T>;

    /// Set the y-value of knot `knot`.
    ///
    /// # Errors
    ///
    /// Returns `SplineError::KnotOutOfRange` for an invalid index.
    fn specify(&mut self, knot: usize, value: T) -> Result<(), SplineError>;

    /// Move knot `knot` to x-position `value`.
    ///
    /// Variants that do not support repositioning keep this default no-op.
    fn specify_x(&mut self, _knot: usize, _value: T) -> Result<(), SplineError> {
        Ok(())
    }

    /// Compute the polynomial coefficients from the current knots.
    ///
    /// On error the previously generated coefficients are left untouched.
    fn generate(&mut self) -> Result<(), SplineError>;

    /// Evaluate the spline at `x`.
    fn compute(&self, x: T) -> Result<T, SplineError>;

    /// Evaluate the first derivative at `x`.
    fn derivative(&self, x: T) -> Result<T, SplineError>;

    /// Owned deep copy of the concrete spline.
    fn box_clone(&self) -> Box<dyn Spline<T>>;

    /// The domain of the spline.
    fn interval(&self) -> Interval<T> {
        self.knots().interval()
    }

    /// Number of knots.
    fn num_knots(&self) -> usize {
        self.knots().len()
    }

    /// Knot x-positions.
    fn knot_xs(&self) -> &[T] {
        self.knots().xs()
    }

    /// Knot y-values.
    fn knot_ys(&self) -> &[T] {
        self.knots().ys()
    }

    /// Flat coefficient triples `(a_0, b_0, c_0, a_1, ...)`.
    fn coefficients(&self) -> &[T] {
        self.knots().coefficients()
    }

    /// Uniform knot spacing.
    fn delta(&self) -> T {
        self.knots().delta()
    }

    /// Whether knots are evenly spaced.
    fn is_uniform(&self) -> bool {
        self.knots().is_uniform()
    }

    /// Whether coefficients are out of date with respect to the knots.
    fn is_stale(&self) -> bool {
        self.knots().is_stale()
    }

    /// Quadratic of segment `i`, if it exists.
    fn segment(&self, i: usize) -> Option<QuadraticSegment<T>> {
        self.knots().segment(i)
    }
}

impl<T: Scalar> Clone for Box<dyn Spline<T>> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

impl<T: Scalar> fmt::Display for dyn Spline<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<Spline")?;
        writeln!(f, "    Knot X:\t{:?}", self.knot_xs())?;
        writeln!(f, "    Knot Y:\t{:?}", self.knot_ys())?;
        write!(f, ">")
    }
}
