//! Piecewise quadratic splines.
//!
//! Every spline stores its knots, its knot values and one quadratic
//! `a x² + b x + c` per segment in global x coordinates. Coefficients are
//! produced by `generate` only; editing knots marks them stale.
//!
//! ## Available Splines
//!
//! - [`QuadraticSpline`]: C¹ interpolation through knot values, uniform or
//!   explicit knots
//! - [`GradientSpline`]: Heights recovered from slope samples, open or closed
//!   at the end value
//! - [`CurvatureSpline`]: Uniform spline between fixed end values shaped by
//!   relative curvatures
//!
//! ## Core Trait
//!
//! All variants implement the object-safe [`Spline`] trait, so they can be
//! held and deep-copied as `Box<dyn Spline<T>>`. [`add`], [`sub`], [`scale`]
//! and [`divide`] combine knot values through that interface.
//!
//! ## Domain
//!
//! Evaluating left of the first knot returns the spline's start value and
//! evaluating at or right of the last knot returns its end value.
//!
//! ## Example
//!
//! ```
//! use lens_core::math::splines::{QuadraticSpline, Spline};
//!
//! let mut spline: QuadraticSpline<f64> = QuadraticSpline::with_knots(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 0.0]).unwrap();
//! spline.generate().unwrap();
//!
//! assert_eq!(spline.compute(1.0).unwrap(), 1.0);
//! assert!((spline.compute(0.5).unwrap() - 0.25).abs() < 1e-12);
//! ```

mod arithmetic;
mod curvature;
mod gradient;
mod knots;
mod quadratic;
mod traits;

// Re-export public types at module level
pub use arithmetic::{add, divide, scale, sub};
pub use curvature::CurvatureSpline;
pub use gradient::GradientSpline;
pub use knots::{Knots, QuadraticSegment};
pub use quadratic::QuadraticSpline;
pub use traits::Spline;
