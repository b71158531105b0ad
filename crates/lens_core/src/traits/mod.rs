//! Core numeric traits.
//!
//! This module defines the scalar abstraction every spline and solver is
//! generic over:
//! - Generic floating-point operations (`Float` trait, re-exported)
//! - The `Scalar` bound used by splines, arguments and solvers
//!
//! Splines are used through `Box<dyn Spline<T>>` and simplex vertices are
//! handed to worker threads, so `Scalar` additionally demands `Send + Sync`,
//! formatting, and a `'static` lifetime.

/// Generic floating-point trait for numeric computations.
///
/// # Examples
/// ```
/// use lens_core::traits::Float;
///
/// fn parabola<T: Float>(a: T, b: T, c: T, x: T) -> T {
///     a * x * x + b * x + c
/// }
///
/// assert_eq!(parabola(1.0_f64, 0.0, 0.0, 3.0), 9.0);
/// ```
pub use num_traits::Float;

use std::fmt;

/// Scalar type accepted by splines and the simplex solver.
///
/// Blanket-implemented for every `Float` that is `Debug + Display + Send +
/// Sync + 'static`, which covers `f32` and `f64`.
///
/// # Examples
/// ```
/// use lens_core::traits::Scalar;
///
/// fn midpoint<T: Scalar>(a: T, b: T) -> T {
///     (a + b) / (T::one() + T::one())
/// }
///
/// assert_eq!(midpoint(1.0_f64, 2.0), 1.5);
/// assert_eq!(midpoint(1.0_f32, 2.0), 1.5);
/// ```
pub trait Scalar: Float + fmt::Debug + fmt::Display + Send + Sync + 'static {}

impl<T> Scalar for T where T: Float + fmt::Debug + fmt::Display + Send + Sync + 'static {}

/// Convert an `f64` literal into `T`.
///
/// Every `Float` can represent the small constants used by the spline and
/// simplex formulas; the fallback only guards exotic `NumCast` impls.
#[inline]
pub(crate) fn constant<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}
