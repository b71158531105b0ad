//! Quadratic spline driven by per-segment curvature weights.

use super::knots::Knots;
use super::Spline;
use crate::traits::{constant, Scalar};
use crate::types::{Interval, SplineError};

/// Uniform quadratic spline between fixed end values, shaped by relative
/// curvatures.
///
/// Segment `i` has second derivative proportional to `curvature(i)`. The
/// common scale factor [`CurvatureSpline::alpha`] is chosen so the spline
/// starts at `y_0` with zero slope and ends at `y_n`; value and slope are
/// continuous at every interior knot.
///
/// Knot values are outputs here: after [`Spline::generate`] the knot y-values
/// hold the spline evaluated at the knots, and [`Spline::specify`] has no
/// effect.
///
/// # Example
///
/// ```
/// use lens_core::math::splines::{CurvatureSpline, Spline};
/// use lens_core::types::Interval;
///
/// let mut spline: CurvatureSpline<f64> = CurvatureSpline::new(3, 0.0, 1.0, Interval::new(0.0, 3.0).unwrap()).unwrap();
/// for i in 0..3 {
///     spline.set_curvature(i, 1.0).unwrap();
/// }
/// spline.generate().unwrap();
///
/// // equal curvature everywhere gives a single parabola x²/9
/// assert!((spline.compute(1.5).unwrap() - 0.25).abs() < 1e-12);
/// assert!((spline.compute(3.0).unwrap() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CurvatureSpline<T: Scalar> {
    knots: Knots<T>,
    curvatures: Vec<T>,
    y_0: T,
    y_n: T,
}

impl<T: Scalar> CurvatureSpline<T> {
    /// Construct a spline with `num_curvatures` segments over `interval`.
    ///
    /// All curvatures start at zero; at least one must be set before
    /// [`Spline::generate`] can succeed.
    pub fn new(
        num_curvatures: usize,
        y_0: T,
        y_n: T,
        interval: Interval<T>,
    ) -> Result<Self, SplineError> {
        let mut knots = Knots::uniform(num_curvatures + 1, interval)?;
        knots.set_y(0, y_0)?;
        knots.set_y(num_curvatures, y_n)?;
        Ok(Self {
            knots,
            curvatures: vec![T::zero(); num_curvatures],
            y_0,
            y_n,
        })
    }

    /// Number of curvature weights, one per segment.
    #[inline]
    pub fn num_curvatures(&self) -> usize {
        self.curvatures.len()
    }

    /// Curvature weight of segment `i`.
    pub fn curvature(&self, i: usize) -> Result<T, SplineError> {
        self.curvatures
            .get(i)
            .copied()
            .ok_or(SplineError::KnotOutOfRange {
                index: i,
                len: self.curvatures.len(),
            })
    }

    /// Set the curvature weight of segment `i`.
    pub fn set_curvature(&mut self, i: usize, value: T) -> Result<(), SplineError> {
        let len = self.curvatures.len();
        let slot = self
            .curvatures
            .get_mut(i)
            .ok_or(SplineError::KnotOutOfRange { index: i, len })?;
        *slot = value;
        Ok(())
    }

    /// Fixed start value.
    #[inline]
    pub fn start_value(&self) -> T {
        self.y_0
    }

    /// Fixed end value.
    #[inline]
    pub fn end_value(&self) -> T {
        self.y_n
    }

    /// Scale factor mapping curvature weights to quadratic coefficients.
    ///
    /// With `m` weights `a_i`, `A = Σ_{i<m-1} a_i` and
    /// `B = Σ_{i<m-1} a_i (m-2-i)`:
    /// `alpha = (y_n - y_0) / (delta² (a_{m-1} + 3A + 2B))`.
    ///
    /// # Errors
    ///
    /// Returns `SplineError::DegenerateCurvature` when the denominator is zero.
    pub fn alpha(&self) -> Result<T, SplineError> {
        let m = self.curvatures.len();
        let (init, last) = match self.curvatures.split_last() {
            Some((last, init)) => (init, *last),
            None => return Err(SplineError::DegenerateCurvature),
        };

        let sum: T = init.iter().fold(T::zero(), |acc, &a| acc + a);
        let weighted: T = init.iter().enumerate().fold(T::zero(), |acc, (i, &a)| {
            acc + a * T::from(m - 2 - i).unwrap_or_else(T::nan)
        });

        let delta = self.knots.delta();
        let denominator =
            delta * delta * (last + constant::<T>(3.0) * sum + constant::<T>(2.0) * weighted);
        if denominator == T::zero() {
            return Err(SplineError::DegenerateCurvature);
        }
        Ok((self.y_n - self.y_0) / denominator)
    }
}

impl<T: Scalar> Spline<T> for CurvatureSpline<T> {
    fn knots(&self) -> &Knots<T> {
        &self.knots
    }

    // Curvature weights are the only control parameters.
    fn specify(&mut self, _knot: usize, _value: T) -> Result<(), SplineError> {
        Ok(())
    }

    fn generate(&mut self) -> Result<(), SplineError> {
        let alpha = self.alpha()?;
        let delta = self.knots.delta();
        let start = self.knots.interval().start();
        let two = constant::<T>(2.0);
        let m = self.curvatures.len();

        // local coordinates: segment i starts at u = 0
        let mut local = Vec::with_capacity(m);
        local.push((alpha * self.curvatures[0], T::zero(), self.y_0));
        for i in 1..m {
            let (_, b_prev, c_prev) = local[i - 1];
            let bend = alpha * self.curvatures[i - 1];
            local.push((
                alpha * self.curvatures[i],
                two * bend * delta + b_prev,
                bend * delta * delta + b_prev * delta + c_prev,
            ));
        }

        let mut coefficients = Vec::with_capacity(3 * m);
        for (i, &(a, b, c)) in local.iter().enumerate() {
            let p = start + delta * T::from(i).unwrap_or_else(T::nan);
            coefficients.extend_from_slice(&[a, b - two * a * p, c + a * p * p - b * p]);
        }

        self.knots.commit(coefficients)?;

        let values = self
            .knots
            .xs()
            .iter()
            .enumerate()
            .map(|(i, &x)| match self.knots.segment(i) {
                Some(segment) => segment.value(x),
                None => self.y_n,
            })
            .collect();
        self.knots.overwrite_ys(values);
        Ok(())
    }

    fn compute(&self, x: T) -> Result<T, SplineError> {
        let location = self.knots.locate_uniform(x)?;
        Ok(self.knots.evaluate(location, x, self.y_0, self.y_n))
    }

    fn derivative(&self, x: T) -> Result<T, SplineError> {
        let location = self.knots.locate_uniform(x)?;
        Ok(self.knots.evaluate_derivative(location, x))
    }

    fn box_clone(&self) -> Box<dyn Spline<T>> {
        Box::new(self.clone())
    }
}
