//! # lens_core: Spline and Simplex Numerics
//!
//! lens_core provides the numeric building blocks of the lens toolkit:
//! - Piecewise quadratic splines with uniform or explicit knots (`math::splines`)
//! - Gradient- and curvature-specified spline variants (`math::splines`)
//! - A derivative-free Nelder–Mead simplex minimiser (`math::solvers`)
//! - Least-squares spline fitting on top of the solver (`math::fitting`)
//! - The scalar abstraction everything is generic over (`traits`)
//! - Interval and error types (`types`)
//!
//! ## Minimal Dependencies
//!
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Structured error types
//! - tracing: Solver progress events
//! - rayon: Independent solves in parallel (optional)
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use lens_core::math::solvers::{
//!     SimplexConfig, SimplexFunctionArgument, SimplexSolver, VectorArgument,
//! };
//! use lens_core::math::splines::{QuadraticSpline, Spline};
//! use lens_core::types::Interval;
//!
//! // Spline through three knots
//! let mut spline = QuadraticSpline::uniform(3, Interval::new(0.0, 2.0).unwrap()).unwrap();
//! spline.specify(1, 1.0).unwrap();
//! spline.generate().unwrap();
//! assert_eq!(spline.compute(1.0).unwrap(), 1.0);
//!
//! // Minimise (x - 3)²
//! let objective = |x: &VectorArgument<f64>| (x.get(0) - 3.0).powi(2);
//! let mut solver = SimplexSolver::new(
//!     objective,
//!     VectorArgument::from(vec![0.0]),
//!     SimplexConfig::new(1.0, 1e-10),
//! )
//! .unwrap();
//! let result = solver.solve().unwrap();
//! # assert!((result.argument().get(0) - 3.0).abs() < 1e-6);
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` (default): Run `solve_independent` on the rayon thread pool
//! - `serde`: Enable serialisation for intervals, configs, arguments and errors

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod traits;
pub mod types;
