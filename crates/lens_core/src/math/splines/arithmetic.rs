//! Pointwise arithmetic on spline knot values.
//!
//! Every operation returns a deep copy of the left operand whose knot
//! y-values were combined through [`Spline::specify`]. The copy is not
//! regenerated, so its coefficients are stale until `generate` is called.
//! Variants that ignore `specify` (curvature splines) come back unchanged.

use super::Spline;
use crate::traits::Scalar;
use crate::types::SplineError;

/// Knot-wise sum `a + b`.
///
/// # Errors
///
/// Returns `SplineError::KnotCountMismatch` if the knot counts differ.
///
/// # Example
///
/// ```
/// use lens_core::math::splines::{add, QuadraticSpline, Spline};
///
/// let a = QuadraticSpline::with_knots(vec![0.0, 1.0], vec![1.0, 2.0]).unwrap();
/// let b = QuadraticSpline::with_knots(vec![0.0, 1.0], vec![0.5, 0.5]).unwrap();
///
/// let sum = add(&a, &b).unwrap();
/// assert_eq!(sum.knot_ys(), &[1.5, 2.5]);
/// assert!(sum.is_stale());
/// ```
pub fn add<T, A, B>(a: &A, b: &B) -> Result<Box<dyn Spline<T>>, SplineError>
where
    T: Scalar,
    A: Spline<T> + ?Sized,
    B: Spline<T> + ?Sized,
{
    combine(a, b, |l, r| l + r)
}

/// Knot-wise difference `a - b`.
///
/// # Errors
///
/// Returns `SplineError::KnotCountMismatch` if the knot counts differ.
pub fn sub<T, A, B>(a: &A, b: &B) -> Result<Box<dyn Spline<T>>, SplineError>
where
    T: Scalar,
    A: Spline<T> + ?Sized,
    B: Spline<T> + ?Sized,
{
    combine(a, b, |l, r| l - r)
}

/// Every knot value of `a` multiplied by `factor`.
pub fn scale<T, A>(a: &A, factor: T) -> Result<Box<dyn Spline<T>>, SplineError>
where
    T: Scalar,
    A: Spline<T> + ?Sized,
{
    map(a, |y| y * factor)
}

/// Every knot value of `a` divided by `divisor`.
///
/// # Errors
///
/// Returns `SplineError::DivisionByZero` when `divisor` is zero.
pub fn divide<T, A>(a: &A, divisor: T) -> Result<Box<dyn Spline<T>>, SplineError>
where
    T: Scalar,
    A: Spline<T> + ?Sized,
{
    if divisor == T::zero() {
        return Err(SplineError::DivisionByZero);
    }
    map(a, |y| y / divisor)
}

fn combine<T, A, B, F>(a: &A, b: &B, op: F) -> Result<Box<dyn Spline<T>>, SplineError>
where
    T: Scalar,
    A: Spline<T> + ?Sized,
    B: Spline<T> + ?Sized,
    F: Fn(T, T) -> T,
{
    if a.num_knots() != b.num_knots() {
        return Err(SplineError::KnotCountMismatch {
            left: a.num_knots(),
            right: b.num_knots(),
        });
    }

    let mut result = a.box_clone();
    for (i, (&l, &r)) in a.knot_ys().iter().zip(b.knot_ys()).enumerate() {
        result.specify(i, op(l, r))?;
    }
    Ok(result)
}

fn map<T, A, F>(a: &A, op: F) -> Result<Box<dyn Spline<T>>, SplineError>
where
    T: Scalar,
    A: Spline<T> + ?Sized,
    F: Fn(T) -> T,
{
    let mut result = a.box_clone();
    for (i, &y) in a.knot_ys().iter().enumerate() {
        result.specify(i, op(y))?;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::splines::{CurvatureSpline, GradientSpline, QuadraticSpline};
    use crate::types::Interval;
    use approx::assert_relative_eq;

    fn quadratic(ys: Vec<f64>) -> QuadraticSpline<f64> {
        let xs = (0..ys.len()).map(|i| i as f64).collect();
        QuadraticSpline::with_knots(xs, ys).unwrap()
    }

    #[test]
    fn test_add_and_sub() {
        let a = quadratic(vec![1.0, 2.0, 3.0]);
        let b = quadratic(vec![0.5, -1.0, 2.0]);

        assert_eq!(add(&a, &b).unwrap().knot_ys(), &[1.5, 1.0, 5.0]);
        assert_eq!(sub(&a, &b).unwrap().knot_ys(), &[0.5, 3.0, 1.0]);
    }

    #[test]
    fn test_operands_untouched() {
        let a = quadratic(vec![1.0, 2.0]);
        let b = quadratic(vec![3.0, 4.0]);
        let _ = add(&a, &b).unwrap();
        assert_eq!(a.knot_ys(), &[1.0, 2.0]);
        assert_eq!(b.knot_ys(), &[3.0, 4.0]);
    }

    #[test]
    fn test_mismatched_knot_counts() {
        let a = quadratic(vec![1.0, 2.0, 3.0]);
        let b = quadratic(vec![1.0, 2.0]);
        match add(&a, &b).unwrap_err() {
            SplineError::KnotCountMismatch { left, right } => {
                assert_eq!(left, 3);
                assert_eq!(right, 2);
            }
            _ => panic!("Expected KnotCountMismatch error"),
        }
    }

    #[test]
    fn test_scale_and_divide() {
        let a = quadratic(vec![1.0, -2.0, 4.0]);
        assert_eq!(scale(&a, 2.0).unwrap().knot_ys(), &[2.0, -4.0, 8.0]);
        assert_eq!(divide(&a, 4.0).unwrap().knot_ys(), &[0.25, -0.5, 1.0]);
    }

    #[test]
    fn test_divide_by_zero() {
        let a = quadratic(vec![1.0, 2.0]);
        assert!(matches!(divide(&a, 0.0), Err(SplineError::DivisionByZero)));
    }

    #[test]
    fn test_result_keeps_variant() {
        let mut a = GradientSpline::closed(1, Interval::new(0.0, 1.0).unwrap(), 0.0, 1.0).unwrap();
        a.generate().unwrap();
        let mut doubled = scale(&a, 2.0).unwrap();
        assert!(doubled.is_stale());
        doubled.generate().unwrap();
        assert_relative_eq!(doubled.compute(1.0).unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_curvature_spline_is_unaffected() {
        let mut a = CurvatureSpline::new(2, 0.0, 1.0, Interval::new(0.0, 1.0).unwrap()).unwrap();
        a.set_curvature(0, 1.0).unwrap();
        a.generate().unwrap();
        let scaled = scale(&a, 3.0).unwrap();
        assert_eq!(scaled.knot_ys(), a.knot_ys());
    }
}
