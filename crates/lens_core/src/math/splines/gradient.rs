//! Quadratic spline reconstructed from gradient samples.

use super::knots::Knots;
use super::Spline;
use crate::traits::{constant, Scalar};
use crate::types::{Interval, SplineError};

/// Quadratic spline whose interior knot values are slopes rather than heights.
///
/// Knot 0 always carries the start value `y_0` and an implicit slope of zero.
/// Every other knot stores the spline's derivative at that knot, and the
/// heights are recovered by integrating the piecewise linear slope.
///
/// In closed mode the last knot stores the end value `y_n` instead of a
/// slope, and the final segment is chosen so that the spline ends exactly at
/// `y_n` while keeping value and slope continuity with its left neighbour.
/// The mode is fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientSpline<T: Scalar> {
    knots: Knots<T>,
    closed: bool,
}

impl<T: Scalar> GradientSpline<T> {
    /// Open spline with `num_gradients` slope samples after the start knot.
    ///
    /// The spline has `num_gradients + 1` knots evenly spaced over `interval`.
    pub fn open(num_gradients: usize, interval: Interval<T>, y_0: T) -> Result<Self, SplineError> {
        let mut knots = Knots::uniform(num_gradients + 1, interval)?;
        knots.set_y(0, y_0)?;
        Ok(Self {
            knots,
            closed: false,
        })
    }

    /// Closed spline pinned to `y_0` at the start and `y_n` at the end.
    ///
    /// The spline has `num_gradients + 2` knots evenly spaced over `interval`.
    pub fn closed(
        num_gradients: usize,
        interval: Interval<T>,
        y_0: T,
        y_n: T,
    ) -> Result<Self, SplineError> {
        let mut knots = Knots::uniform(num_gradients + 2, interval)?;
        let last = knots.len() - 1;
        knots.set_y(0, y_0)?;
        knots.set_y(last, y_n)?;
        Ok(Self {
            knots,
            closed: true,
        })
    }

    /// Whether the last knot pins the end value.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of slope samples.
    pub fn num_gradients(&self) -> usize {
        if self.closed {
            self.knots.len() - 2
        } else {
            self.knots.len() - 1
        }
    }

    /// Slope sample `i`, stored at knot `i + 1`.
    ///
    /// # Errors
    ///
    /// Returns `SplineError::KnotOutOfRange` when `i >= num_gradients()`.
    pub fn gradient(&self, i: usize) -> Result<T, SplineError> {
        let knot = self.gradient_knot(i)?;
        Ok(self.knots.ys()[knot])
    }

    /// Set slope sample `i`.
    pub fn set_gradient(&mut self, i: usize, value: T) -> Result<(), SplineError> {
        let knot = self.gradient_knot(i)?;
        self.knots.set_y(knot, value)
    }

    /// Value at the start of the domain.
    pub fn start_value(&self) -> T {
        self.knots.ys()[0]
    }

    /// Value at the end of the domain.
    ///
    /// Closed splines return the pinned `y_n`. Open splines return the value
    /// of the last generated segment at the interval end.
    pub fn end_value(&self) -> T {
        if self.closed {
            self.knots.ys()[self.knots.len() - 1]
        } else {
            self.knots.right_end_value()
        }
    }

    fn gradient_knot(&self, i: usize) -> Result<usize, SplineError> {
        if i >= self.num_gradients() {
            return Err(SplineError::KnotOutOfRange {
                index: i,
                len: self.num_gradients(),
            });
        }
        Ok(i + 1)
    }

    /// Slope at knot `i`; knot 0 has zero slope by construction.
    #[inline]
    fn eta(&self, i: usize) -> T {
        if i == 0 {
            T::zero()
        } else {
            self.knots.ys()[i]
        }
    }
}

impl<T: Scalar> Spline<T> for GradientSpline<T> {
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
        let xs = self.knots.xs();
        let n = xs.len() - 1;
        let two = constant::<T>(2.0);
        let half = constant::<T>(0.5);
        let border = if self.closed { n - 1 } else { n };

        let mut coefficients = Vec::with_capacity(3 * n);
        let mut y = self.knots.ys()[0];

        for i in 1..=border {
            let h = self.knots.width(i);
            let x0 = xs[i - 1];
            let (eta0, eta1) = (self.eta(i - 1), self.eta(i));

            let a = half * (eta1 - eta0) / h;
            let b = eta0 - two * a * x0;
            let c = a * x0 * x0 - eta0 * x0 + y;
            coefficients.extend_from_slice(&[a, b, c]);

            y = y + half * h * (eta0 + eta1);
        }

        if self.closed {
            let h = self.knots.width(n);
            let x0 = xs[n - 1];
            let eta0 = self.eta(n - 1);
            let y_n = self.knots.ys()[n];

            let a = (y_n - y - h * eta0) / (h * h);
            let b = eta0 - two * a * x0;
            let c = a * x0 * x0 - eta0 * x0 + y;
            coefficients.extend_from_slice(&[a, b, c]);
        }

        self.knots.commit(coefficients)
    }

    fn compute(&self, x: T) -> Result<T, SplineError> {
        let location = self.knots.locate(x);
        Ok(self
            .knots
            .evaluate(location, x, self.start_value(), self.knots.right_end_value()))
    }

    fn derivative(&self, x: T) -> Result<T, SplineError> {
        Ok(self.knots.evaluate_derivative(self.knots.locate(x), x))
    }

    fn box_clone(&self) -> Box<dyn Spline<T>> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit() -> Interval<f64> {
        Interval::new(0.0, 1.0).unwrap()
    }

    // ========================================
    // Construction Tests
    // ========================================

    #[test]
    fn test_open_layout() {
        let spline = GradientSpline::open(4, unit(), 2.5).unwrap();
        assert!(!spline.is_closed());
        assert_eq!(spline.num_knots(), 5);
        assert_eq!(spline.num_gradients(), 4);
        assert_eq!(spline.start_value(), 2.5);
        assert_eq!(spline.knot_ys(), &[2.5, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_closed_layout() {
        let spline = GradientSpline::closed(3, unit(), 1.0, -1.0).unwrap();
        assert!(spline.is_closed());
        assert_eq!(spline.num_knots(), 5);
        assert_eq!(spline.num_gradients(), 3);
        assert_eq!(spline.start_value(), 1.0);
        assert_eq!(spline.end_value(), -1.0);
    }

    #[test]
    fn test_open_without_gradients_is_rejected() {
        let result = GradientSpline::open(0, unit(), 0.0);
        assert!(matches!(
            result,
            Err(SplineError::InsufficientKnots { got: 1, need: 2 })
        ));
    }

    #[test]
    fn test_gradient_index_bounds() {
        let mut spline = GradientSpline::closed(2, unit(), 0.0, 0.0).unwrap();
        spline.set_gradient(1, 3.0).unwrap();
        assert_eq!(spline.gradient(1).unwrap(), 3.0);
        assert_eq!(spline.knot_ys()[2], 3.0);

        match spline.set_gradient(2, 1.0).unwrap_err() {
            SplineError::KnotOutOfRange { index, len } => {
                assert_eq!(index, 2);
                assert_eq!(len, 2);
            }
            _ => panic!("Expected KnotOutOfRange error"),
        }
    }

    // ========================================
    // Generation Tests
    // ========================================

    #[test]
    fn test_open_reconstructs_gradients() {
        let mut spline = GradientSpline::open(4, unit(), 0.5).unwrap();
        let gradients = [1.0, -2.0, 0.5, 3.0];
        for (i, &g) in gradients.iter().enumerate() {
            spline.set_gradient(i, g).unwrap();
        }
        spline.generate().unwrap();

        assert_relative_eq!(spline.compute(0.0).unwrap(), 0.5);
        assert_relative_eq!(spline.derivative(0.0).unwrap(), 0.0, epsilon = 1e-12);
        for (i, &g) in gradients.iter().enumerate() {
            let x = spline.knot_xs()[i + 1];
            let left = spline.segment(i).unwrap().derivative(x);
            assert_relative_eq!(left, g, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_open_constant_slope_is_trapezoidal() {
        // slopes 0, 1, 1 over [0, 2] integrate to 0.5 then 1.5
        let mut spline = GradientSpline::open(2, Interval::new(0.0, 2.0).unwrap(), 0.0).unwrap();
        spline.set_gradient(0, 1.0).unwrap();
        spline.set_gradient(1, 1.0).unwrap();
        spline.generate().unwrap();

        assert_relative_eq!(spline.compute(1.0).unwrap(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(spline.end_value(), 1.5, epsilon = 1e-12);
        assert_relative_eq!(spline.compute(5.0).unwrap(), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_closed_hits_end_value() {
        let mut spline = GradientSpline::closed(3, Interval::new(-1.0, 2.0).unwrap(), 1.0, 4.0)
            .unwrap();
        spline.set_gradient(0, 0.5).unwrap();
        spline.set_gradient(1, -1.0).unwrap();
        spline.set_gradient(2, 2.0).unwrap();
        spline.generate().unwrap();

        let last = spline.segment(3).unwrap();
        assert_relative_eq!(last.value(2.0), 4.0, epsilon = 1e-10);
        assert_relative_eq!(spline.compute(2.0).unwrap(), 4.0, epsilon = 1e-10);
        assert_relative_eq!(spline.compute(-1.0).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_closed_last_segment_is_c1() {
        let mut spline = GradientSpline::closed(2, unit(), 0.0, 1.0).unwrap();
        spline.set_gradient(0, 2.0).unwrap();
        spline.set_gradient(1, -0.5).unwrap();
        spline.generate().unwrap();

        for i in 1..spline.num_knots() - 1 {
            let x = spline.knot_xs()[i];
            let left = spline.segment(i - 1).unwrap();
            let right = spline.segment(i).unwrap();
            assert_relative_eq!(left.value(x), right.value(x), epsilon = 1e-10);
            assert_relative_eq!(left.derivative(x), right.derivative(x), epsilon = 1e-10);
        }
    }

    #[test]
    fn test_closed_without_gradients_is_single_parabola() {
        let mut spline = GradientSpline::closed(0, unit(), 0.0, 1.0).unwrap();
        spline.generate().unwrap();
        // zero slope at 0 and value 1 at 1 gives x²
        assert_eq!(spline.coefficients(), &[1.0, 0.0, 0.0]);
        assert_relative_eq!(spline.compute(0.5).unwrap(), 0.25);
    }

    #[test]
    fn test_specify_moves_start_value() {
        let mut spline = GradientSpline::open(1, unit(), 0.0).unwrap();
        spline.specify(0, 2.0).unwrap();
        spline.generate().unwrap();
        assert_eq!(spline.start_value(), 2.0);
        assert_relative_eq!(spline.compute(0.0).unwrap(), 2.0);
    }

    #[test]
    fn test_non_uniform_widths() {
        let mut spline = GradientSpline::open(2, Interval::new(0.0, 2.0).unwrap(), 0.0).unwrap();
        spline.specify_x(1, 0.5).unwrap();
        spline.set_gradient(0, 1.0).unwrap();
        spline.set_gradient(1, 1.0).unwrap();
        spline.generate().unwrap();

        // 0.5 * (0 + 1) / 2 + 1.5 * (1 + 1) / 2
        assert_relative_eq!(spline.end_value(), 1.75, epsilon = 1e-12);
        assert_relative_eq!(spline.compute(0.5).unwrap(), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_box_clone_keeps_mode() {
        let mut spline = GradientSpline::closed(1, unit(), 0.0, 2.0).unwrap();
        spline.generate().unwrap();
        let copy = spline.box_clone();
        assert_relative_eq!(copy.compute(1.0).unwrap(), 2.0, epsilon = 1e-12);
        assert_eq!(copy.num_knots(), 3);
    }
}
