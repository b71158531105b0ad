//! Numerical building blocks.
//!
//! - [`splines`]: Piecewise quadratic splines and their knot arithmetic
//! - [`solvers`]: Nelder–Mead downhill simplex minimisation
//! - [`fitting`]: Least-squares spline fitting on top of the simplex solver

pub mod fitting;
pub mod solvers;
pub mod splines;
