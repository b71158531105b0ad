//! C¹ piecewise quadratic interpolation through knot values.

use super::knots::Knots;
use super::Spline;
use crate::traits::{constant, Scalar};
use crate::types::{Interval, SplineError};

/// Piecewise quadratic spline with continuous value and first derivative.
///
/// Passes through every knot `(x[i], y[i])`. The slope at knot 0 is fixed at
/// zero, which makes the slope-continuity system solvable by forward
/// substitution: the slope `w[i]` at knot `i` satisfies
/// `w[i] = d[i] - d[i-1] + w[i-2]` with `d[i] = 2 (y[i] - y[i-1]) / (x[i] - x[i-1])`.
///
/// Knots are either evenly spaced over an interval (O(1) segment lookup) or
/// given explicitly (bracketing search).
///
/// # Example
///
/// ```
/// use lens_core::math::splines::{QuadraticSpline, Spline};
/// use lens_core::types::Interval;
///
/// let mut spline = QuadraticSpline::uniform(3, Interval::new(0.0, 2.0).unwrap()).unwrap();
/// spline.specify(1, 1.0).unwrap();
/// spline.generate().unwrap();
///
/// assert_eq!(spline.compute(1.0).unwrap(), 1.0);
/// assert_eq!(spline.derivative(0.0).unwrap(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QuadraticSpline<T: Scalar> {
    knots: Knots<T>,
}

impl<T: Scalar> QuadraticSpline<T> {
    /// Construct a spline with `num_knots` evenly spaced knots over
    /// `interval`. All knot values start at zero.
    ///
    /// # Errors
    ///
    /// * `SplineError::InsufficientKnots` - fewer than 2 knots
    /// * `SplineError::InvalidInterval` - zero-width interval
    pub fn uniform(num_knots: usize, interval: Interval<T>) -> Result<Self, SplineError> {
        Ok(Self {
            knots: Knots::uniform(num_knots, interval)?,
        })
    }

    /// Construct a spline through explicit, possibly non-uniform knots.
    ///
    /// # Errors
    ///
    /// * `SplineError::KnotLengthMismatch` - `xs` and `ys` differ in length
    /// * `SplineError::InsufficientKnots` - fewer than 2 knots
    /// * `SplineError::NonIncreasingKnots` - `xs` not strictly increasing
    pub fn with_knots(xs: Vec<T>, ys: Vec<T>) -> Result<Self, SplineError> {
        Ok(Self {
            knots: Knots::explicit(xs, ys)?,
        })
    }

    /// Restore a spline from previously generated coefficients.
    ///
    /// `coefficients` holds `(a, b, c)` per segment and must have length
    /// `3 * (xs.len() - 1)`. The spline is considered generated.
    pub fn from_coefficients(
        xs: Vec<T>,
        ys: Vec<T>,
        coefficients: Vec<T>,
    ) -> Result<Self, SplineError> {
        let mut knots = Knots::explicit(xs, ys)?;
        knots.restore(coefficients)?;
        Ok(Self { knots })
    }
}

/// Coefficients of the C¹ quadratic interpolant through `(xs, ys)`.
fn interpolating_coefficients<T: Scalar>(xs: &[T], ys: &[T]) -> Vec<T> {
    let n = xs.len();
    let two = constant::<T>(2.0);
    let half = constant::<T>(0.5);

    // d[0] is a placeholder
    let mut d = vec![T::zero(); n];
    for i in 1..n {
        d[i] = two * (ys[i] - ys[i - 1]) / (xs[i] - xs[i - 1]);
    }

    // slope at each knot, w[0] = 0
    let mut w = vec![T::zero(); n];
    for i in 1..n {
        let carried = if i > 1 { w[i - 2] } else { T::zero() };
        w[i] = d[i] - d[i - 1] + carried;
    }

    let mut coefficients = Vec::with_capacity(3 * (n - 1));
    for i in 1..n {
        let x0 = xs[i - 1];
        let a = half * (w[i] - w[i - 1]) / (xs[i] - x0);
        let b = w[i - 1] - two * a * x0;
        let c = a * x0 * x0 - w[i - 1] * x0 + ys[i - 1];
        coefficients.extend_from_slice(&[a, b, c]);
    }
    coefficients
}

impl<T: Scalar> Spline<T> for QuadraticSpline<T> {
    fn knots(&self) -> &Knots<T> {
        &self.knots
    }

    fn specify(&mut self, knot: usize, value: T) -> Result<(), SplineError> {
        self.knots.set_y(knot, value)
    }

    fn specify_x(&mut self, knot: usize, value: T) -> Result<(), SplineError> {
        self.knots.set_x(knot, value)
    }

    fn generate(&mut self) -> Result<(), SplineError> {
        let coefficients = interpolating_coefficients(self.knots.xs(), self.knots.ys());
        self.knots.commit(coefficients)
    }

    fn compute(&self, x: T) -> Result<T, SplineError> {
        let ys = self.knots.ys();
        let location = self.knots.locate(x);
        Ok(self
            .knots
            .evaluate(location, x, ys[0], ys[ys.len() - 1]))
    }

    fn derivative(&self, x: T) -> Result<T, SplineError> {
        Ok(self.knots.evaluate_derivative(self.knots.locate(x), x))
    }

    fn box_clone(&self) -> Box<dyn Spline<T>> {
        Box::new(self.clone())
    }
}
