//! Derivative-free optimisation.
//!
//! This module provides a Nelder–Mead downhill simplex minimiser that works
//! over an abstract vector-space argument, so the search space can be plain
//! coordinates, spline knot values or any other parameterisation that
//! supports addition and scaling.
//!
//! ## Components
//!
//! - [`SimplexFunctionArgument`]: The vector-space contract of a search point
//! - [`VectorArgument`]: Dense `Vec<T>` implementation
//! - [`SimplexFunction`]: The objective, with an optional `pre_compute` hook
//! - [`SimplexPair`]: A vertex, ordered by objective value
//! - [`SimplexSolver`]: The iteration itself
//! - [`ProgressObserver`]: Side channel for progress reporting
//!
//! ## Configuration
//!
//! [`SimplexConfig`] controls:
//! - `lambda`: Initial vertex offset (default: 1)
//! - `tolerance`: Plateau tolerance (default: 1e-10)
//! - `max_iterations`: Optional iteration cap (default: unbounded)
//! - `report_progress`: Emit `tracing` events (default: false)
//!
//! ## Example
//!
//! ```
//! use lens_core::math::solvers::{
//!     SimplexConfig, SimplexFunctionArgument, SimplexSolver, VectorArgument,
//! };
//!
//! // Minimize (x - 1)² + 2 (y + 2)²
//! let objective = |p: &VectorArgument<f64>| {
//!     (p.get(0) - 1.0).powi(2) + 2.0 * (p.get(1) + 2.0).powi(2)
//! };
//!
//! let start = VectorArgument::from(vec![0.3, 0.7]);
//! let mut solver = SimplexSolver::new(objective, start, SimplexConfig::new(1.0, 1e-14)).unwrap();
//! let result = solver.solve().unwrap();
//!
//! assert!(result.converged);
//! assert!((result.argument().get(0) - 1.0).abs() < 1e-4);
//! assert!((result.argument().get(1) + 2.0).abs() < 1e-4);
//! ```

mod argument;
mod config;
mod function;
mod pair;
mod progress;
mod simplex;

// Re-export public types at module level
pub use argument::{SimplexFunctionArgument, VectorArgument};
pub use config::SimplexConfig;
pub use function::SimplexFunction;
pub use pair::SimplexPair;
pub use progress::{NoProgress, ProgressObserver, SimplexStep, TracingProgress};
pub use simplex::{solve_independent, SimplexResult, SimplexSolver, SolverState};
