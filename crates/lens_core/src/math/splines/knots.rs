//! Knot storage, segment lookup and quadratic segment evaluation shared by
//! every spline variant.

use crate::traits::Scalar;
use crate::types::{Interval, SplineError};

/// Quadratic polynomial of one spline segment.
///
/// Represents `y = a*x² + b*x + c` in global x coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticSegment<T> {
    /// Quadratic coefficient
    pub a: T,
    /// Linear coefficient
    pub b: T,
    /// Constant coefficient
    pub c: T,
}

impl<T: Scalar> QuadraticSegment<T> {
    /// Evaluate the polynomial at `x`.
    #[inline]
    pub fn value(&self, x: T) -> T {
        self.a * x * x + self.b * x + self.c
    }

    /// Evaluate the first derivative `2*a*x + b` at `x`.
    #[inline]
    pub fn derivative(&self, x: T) -> T {
        (self.a + self.a) * x + self.b
    }

    /// Whether all three coefficients are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.a.is_finite() && self.b.is_finite() && self.c.is_finite()
    }
}

/// Where a query point falls relative to the knots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Location {
    /// Left of the first knot.
    Below,
    /// Inside segment `i`, i.e. `x[i] <= x < x[i+1]`.
    Segment(usize),
    /// At or right of the last knot.
    Above,
}

/// Knot positions, knot values and generated coefficients of a spline.
///
/// Coefficients are stored as consecutive triples `(a_i, b_i, c_i)`, one per
/// segment, so `coefficients().len() == 3 * (num_knots - 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Knots<T: Scalar> {
    xs: Vec<T>,
    ys: Vec<T>,
    coefficients: Vec<T>,
    interval: Interval<T>,
    delta: T,
    uniform: bool,
    stale: bool,
}

impl<T: Scalar> Knots<T> {
    /// Evenly spaced knots over `interval` with zero values.
    pub(crate) fn uniform(num_knots: usize, interval: Interval<T>) -> Result<Self, SplineError> {
        let delta = interval.uniform_spacing(num_knots)?;
        if delta <= T::zero() {
            return Err(invalid_interval(&interval));
        }

        let mut xs: Vec<T> = (0..num_knots)
            .map(|i| interval.start() + T::from(i).unwrap_or_else(T::nan) * delta)
            .collect();
        // pin the last knot to the interval end so rounding cannot shrink the domain
        xs[num_knots - 1] = interval.end();

        Ok(Self {
            xs,
            ys: vec![T::zero(); num_knots],
            coefficients: vec![T::zero(); 3 * (num_knots - 1)],
            interval,
            delta,
            uniform: true,
            stale: true,
        })
    }

    /// Explicit, possibly non-uniform knots.
    pub(crate) fn explicit(xs: Vec<T>, ys: Vec<T>) -> Result<Self, SplineError> {
        if xs.len() != ys.len() {
            return Err(SplineError::KnotLengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        if xs.len() < 2 {
            return Err(SplineError::InsufficientKnots {
                got: xs.len(),
                need: 2,
            });
        }
        if let Some(index) = (1..xs.len()).find(|&i| !(xs[i - 1] < xs[i])) {
            return Err(SplineError::NonIncreasingKnots { index });
        }

        let interval = Interval::new(xs[0], xs[xs.len() - 1])?;
        let delta = interval.uniform_spacing(xs.len())?;
        let segments = xs.len() - 1;

        Ok(Self {
            xs,
            ys,
            coefficients: vec![T::zero(); 3 * segments],
            interval,
            delta,
            uniform: false,
            stale: true,
        })
    }

    /// Knot x-positions.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// Knot y-values.
    #[inline]
    pub fn ys(&self) -> &[T] {
        &self.ys
    }

    /// Flat coefficient triples.
    #[inline]
    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }

    /// Domain covered by the knots.
    #[inline]
    pub fn interval(&self) -> Interval<T> {
        self.interval
    }

    /// Uniform knot spacing; meaningful only while the knots are uniform.
    #[inline]
    pub fn delta(&self) -> T {
        self.delta
    }

    /// Whether the knots are evenly spaced by `delta`.
    #[inline]
    pub fn is_uniform(&self) -> bool {
        self.uniform
    }

    /// Whether knots changed since coefficients were last generated.
    #[inline]
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Number of knots.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Always false for constructed knots; present for API completeness.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Number of quadratic segments, `len() - 1`.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.xs.len() - 1
    }

    /// Coefficients of segment `i`, if it exists.
    pub fn segment(&self, i: usize) -> Option<QuadraticSegment<T>> {
        segment_at(&self.coefficients, i)
    }

    /// Width of segment `i` (1-based right knot index), honouring uniformity.
    #[inline]
    pub(crate) fn width(&self, i: usize) -> T {
        if self.uniform {
            self.delta
        } else {
            self.xs[i] - self.xs[i - 1]
        }
    }

    pub(crate) fn check_knot(&self, knot: usize) -> Result<(), SplineError> {
        if knot >= self.xs.len() {
            return Err(SplineError::KnotOutOfRange {
                index: knot,
                len: self.xs.len(),
            });
        }
        Ok(())
    }

    /// Overwrite knot `knot`'s y-value.
    pub(crate) fn set_y(&mut self, knot: usize, value: T) -> Result<(), SplineError> {
        self.check_knot(knot)?;
        self.ys[knot] = value;
        self.stale = true;
        Ok(())
    }

    /// Move knot `knot` to `value`, turning the knots non-uniform.
    ///
    /// The new position must keep the knots strictly increasing. Moving an
    /// end knot moves the matching interval bound.
    pub(crate) fn set_x(&mut self, knot: usize, value: T) -> Result<(), SplineError> {
        self.check_knot(knot)?;
        let last = self.xs.len() - 1;
        if knot > 0 && !(self.xs[knot - 1] < value) {
            return Err(SplineError::NonIncreasingKnots { index: knot });
        }
        if knot < last && !(value < self.xs[knot + 1]) {
            return Err(SplineError::NonIncreasingKnots { index: knot + 1 });
        }

        let start = if knot == 0 { value } else { self.interval.start() };
        let end = if knot == last { value } else { self.interval.end() };
        self.interval = self.interval.with_bounds(start, end)?;
        self.xs[knot] = value;
        self.uniform = false;
        self.stale = true;
        Ok(())
    }

    /// Replace every knot value after generation (knot values derived from
    /// the coefficients rather than specified).
    pub(crate) fn overwrite_ys(&mut self, ys: Vec<T>) {
        debug_assert_eq!(ys.len(), self.ys.len());
        self.ys = ys;
    }

    /// Install freshly generated coefficients.
    ///
    /// Nothing is written unless every segment is finite, so a failed
    /// generation leaves the previous coefficients intact.
    pub(crate) fn commit(&mut self, coefficients: Vec<T>) -> Result<(), SplineError> {
        debug_assert_eq!(coefficients.len(), self.coefficients.len());
        let finite = |i: usize| segment_at(&coefficients, i).is_some_and(|s| s.is_finite());
        if let Some(segment) = (0..self.segment_count()).find(|&i| !finite(i)) {
            return Err(SplineError::NonFiniteCoefficients { segment });
        }
        self.coefficients = coefficients;
        self.stale = false;
        Ok(())
    }

    /// Install coefficients without validation (restoration path).
    pub(crate) fn restore(&mut self, coefficients: Vec<T>) -> Result<(), SplineError> {
        let expected = 3 * self.segment_count();
        if coefficients.len() != expected {
            return Err(SplineError::CoefficientLengthMismatch {
                expected,
                got: coefficients.len(),
            });
        }
        self.coefficients = coefficients;
        self.stale = false;
        Ok(())
    }

    /// Locate `x`, dispatching on the uniformity flag.
    pub(crate) fn locate(&self, x: T) -> Location {
        if self.uniform {
            self.locate_evenly(x)
        } else {
            self.locate_by_search(x)
        }
    }

    /// O(1) lookup that is only valid for uniform knots.
    ///
    /// # Errors
    ///
    /// Returns `SplineError::NonUniform` when the knots have been moved.
    pub(crate) fn locate_uniform(&self, x: T) -> Result<Location, SplineError> {
        if !self.uniform {
            return Err(SplineError::NonUniform);
        }
        Ok(self.locate_evenly(x))
    }

    fn locate_evenly(&self, x: T) -> Location {
        if x.is_nan() {
            return Location::Segment(0);
        }
        if x < self.interval.start() {
            return Location::Below;
        }
        // the division below may round just short of the last knot
        if x >= self.xs[self.xs.len() - 1] {
            return Location::Above;
        }
        match ((x - self.interval.start()) / self.delta).floor().to_usize() {
            Some(i) if i < self.segment_count() => Location::Segment(i),
            _ => Location::Above,
        }
    }

    fn locate_by_search(&self, x: T) -> Location {
        if x.is_nan() {
            return Location::Segment(0);
        }
        if x < self.xs[0] {
            return Location::Below;
        }
        // first knot strictly right of x; x[pos-1] <= x < x[pos]
        let pos = self.xs.partition_point(|&knot| knot <= x);
        if pos >= self.xs.len() {
            Location::Above
        } else {
            Location::Segment(pos - 1)
        }
    }

    /// Evaluate at `location`, returning the supplied boundary values outside
    /// the knot range.
    pub(crate) fn evaluate(&self, location: Location, x: T, below: T, above: T) -> T {
        match location {
            Location::Below => below,
            Location::Above => above,
            Location::Segment(i) => self.segment(i).map_or(above, |s| s.value(x)),
        }
    }

    /// Derivative at `location`; outside the knots the boundary segment's
    /// one-sided derivative at the boundary is returned.
    pub(crate) fn evaluate_derivative(&self, location: Location, x: T) -> T {
        let (i, at) = match location {
            Location::Below => (0, self.interval.start()),
            Location::Above => (self.segment_count() - 1, self.interval.end()),
            Location::Segment(i) => (i, x),
        };
        self.segment(i).map_or_else(T::nan, |s| s.derivative(at))
    }

    /// Value of the last segment at the right end of the domain.
    pub(crate) fn right_end_value(&self) -> T {
        self.segment(self.segment_count() - 1)
            .map_or_else(T::nan, |s| s.value(self.interval.end()))
    }
}

fn segment_at<T: Scalar>(coefficients: &[T], i: usize) -> Option<QuadraticSegment<T>> {
    let chunk = coefficients.get(3 * i..3 * i + 3)?;
    Some(QuadraticSegment {
        a: chunk[0],
        b: chunk[1],
        c: chunk[2],
    })
}

fn invalid_interval<T: Scalar>(interval: &Interval<T>) -> SplineError {
    SplineError::InvalidInterval {
        start: interval.start().to_f64().unwrap_or(f64::NAN),
        end: interval.end().to_f64().unwrap_or(f64::NAN),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit(n: usize) -> Knots<f64> {
        Knots::uniform(n, Interval::new(0.0, 1.0).unwrap()).unwrap()
    }

    #[test]
    fn test_uniform_knot_positions() {
        let knots = unit(5);
        assert_eq!(knots.len(), 5);
        assert_eq!(knots.segment_count(), 4);
        assert_eq!(knots.coefficients().len(), 12);
        for (i, &x) in knots.xs().iter().enumerate() {
            assert_relative_eq!(x, i as f64 * 0.25, epsilon = 1e-15);
        }
        assert!(knots.is_uniform());
        assert!(knots.is_stale());
    }

    #[test]
    fn test_uniform_rejects_degenerate_interval() {
        let result = Knots::uniform(3, Interval::new(1.0, 1.0).unwrap());
        assert!(matches!(result, Err(SplineError::InvalidInterval { .. })));
    }

    #[test]
    fn test_uniform_rejects_single_knot() {
        let result = Knots::uniform(1, Interval::new(0.0, 1.0).unwrap());
        assert!(matches!(
            result,
            Err(SplineError::InsufficientKnots { got: 1, need: 2 })
        ));
    }

    #[test]
    fn test_explicit_validation() {
        assert!(matches!(
            Knots::explicit(vec![0.0, 1.0], vec![0.0]),
            Err(SplineError::KnotLengthMismatch { xs: 2, ys: 1 })
        ));
        assert!(matches!(
            Knots::explicit(vec![0.0], vec![0.0]),
            Err(SplineError::InsufficientKnots { got: 1, need: 2 })
        ));
        assert!(matches!(
            Knots::explicit(vec![0.0, 1.0, 1.0], vec![0.0, 0.0, 0.0]),
            Err(SplineError::NonIncreasingKnots { index: 2 })
        ));
    }

    #[test]
    fn test_explicit_interval_from_end_knots() {
        let knots = Knots::explicit(vec![-1.0, 0.5, 4.0], vec![0.0; 3]).unwrap();
        assert_eq!(knots.interval().start(), -1.0);
        assert_eq!(knots.interval().end(), 4.0);
        assert!(!knots.is_uniform());
    }

    #[test]
    fn test_locate_uniform() {
        let knots = unit(5);
        assert_eq!(knots.locate(-0.1), Location::Below);
        assert_eq!(knots.locate(0.0), Location::Segment(0));
        assert_eq!(knots.locate(0.3), Location::Segment(1));
        assert_eq!(knots.locate(0.99), Location::Segment(3));
        assert_eq!(knots.locate(1.0), Location::Above);
        assert_eq!(knots.locate(7.0), Location::Above);
    }

    #[test]
    fn test_locate_by_search_matches_bracketing() {
        let knots = Knots::explicit(vec![0.0, 0.1, 0.5, 2.0], vec![0.0; 4]).unwrap();
        assert_eq!(knots.locate(-1.0), Location::Below);
        assert_eq!(knots.locate(0.0), Location::Segment(0));
        assert_eq!(knots.locate(0.1), Location::Segment(1));
        assert_eq!(knots.locate(0.49), Location::Segment(1));
        assert_eq!(knots.locate(1.5), Location::Segment(2));
        assert_eq!(knots.locate(2.0), Location::Above);
    }

    #[test]
    fn test_locate_uniform_fails_on_non_uniform() {
        let knots = Knots::explicit(vec![0.0, 0.1, 0.5], vec![0.0; 3]).unwrap();
        assert_eq!(knots.locate_uniform(0.2), Err(SplineError::NonUniform));

        let knots = unit(3);
        assert_eq!(knots.locate_uniform(0.2), Ok(Location::Segment(0)));
    }

    #[test]
    fn test_set_x_flips_uniform_and_updates_interval() {
        let mut knots = unit(3);
        knots.set_x(2, 2.0).unwrap();
        assert!(!knots.is_uniform());
        assert_eq!(knots.interval().end(), 2.0);

        knots.set_x(0, -1.0).unwrap();
        assert_eq!(knots.interval().start(), -1.0);
    }

    #[test]
    fn test_set_x_rejects_reordering() {
        let mut knots = unit(3);
        assert!(matches!(
            knots.set_x(1, 1.5),
            Err(SplineError::NonIncreasingKnots { index: 2 })
        ));
        assert!(matches!(
            knots.set_x(1, 0.0),
            Err(SplineError::NonIncreasingKnots { index: 1 })
        ));
        // a rejected move leaves the knots untouched
        assert!(knots.is_uniform());
        assert_relative_eq!(knots.xs()[1], 0.5, epsilon = 1e-15);
    }

    #[test]
    fn test_commit_rejects_non_finite_and_keeps_previous() {
        let mut knots = unit(3);
        knots.commit(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert!(!knots.is_stale());

        let err = knots
            .commit(vec![1.0, 2.0, 3.0, f64::NAN, 5.0, 6.0])
            .unwrap_err();
        assert_eq!(err, SplineError::NonFiniteCoefficients { segment: 1 });
        assert_eq!(knots.coefficients(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_segment_value_and_derivative() {
        let segment = QuadraticSegment {
            a: 2.0,
            b: -1.0,
            c: 0.5,
        };
        assert_relative_eq!(segment.value(2.0), 8.0 - 2.0 + 0.5);
        assert_relative_eq!(segment.derivative(2.0), 7.0);
    }

    #[test]
    fn test_restore_checks_length() {
        let mut knots = unit(3);
        assert!(matches!(
            knots.restore(vec![0.0; 5]),
            Err(SplineError::CoefficientLengthMismatch {
                expected: 6,
                got: 5
            })
        ));
    }
}
