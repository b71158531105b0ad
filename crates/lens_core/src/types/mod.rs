//! Core value and error types.
//!
//! This module provides:
//! - `interval`: The closed scalar interval every spline lives on
//! - `error`: Structured error types for spline and simplex operations
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Interval`] from `interval`
//! - [`SplineError`], [`SimplexError`], [`FitError`] from `error`

pub mod error;
pub mod interval;

// Re-export commonly used types at module level
pub use error::{FitError, SimplexError, SplineError};
pub use interval::Interval;
