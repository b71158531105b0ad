//! Progress reporting for the simplex solver.
//!
//! Observers only watch; they never influence the numerics.

use crate::traits::Scalar;
use std::fmt;

/// The move a simplex iteration ended with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimplexStep {
    /// Worst vertex replaced by its reflection through the centroid.
    Reflect,
    /// Worst vertex replaced by the expanded reflection.
    Expand,
    /// Worst vertex replaced by the inside contraction.
    Contract,
    /// Every vertex but the best moved halfway towards the best.
    Shrink,
}

impl fmt::Display for SimplexStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SimplexStep::Reflect => "reflect",
            SimplexStep::Expand => "expand",
            SimplexStep::Contract => "contract",
            SimplexStep::Shrink => "shrink",
        };
        write!(f, "{}", name)
    }
}

/// Receives solver progress events.
///
/// All methods default to doing nothing.
pub trait ProgressObserver<T: Scalar> {
    /// The initial simplex of `vertices` vertices has been evaluated.
    fn on_initialized(&mut self, _vertices: usize, _best: T) {}

    /// Iteration `iteration` (1-based) finished with `step`.
    fn on_iteration(&mut self, _iteration: usize, _step: SimplexStep, _best: T) {}

    /// The solve stopped after `iterations` iterations.
    fn on_finished(&mut self, _iterations: usize, _converged: bool, _best: T) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl<T: Scalar> ProgressObserver<T> for NoProgress {}

/// Observer that forwards progress as `tracing` events.
///
/// Start and end are logged at `info`, every `every`-th iteration at `debug`
/// and each individual move at `trace`.
#[derive(Debug, Clone, Copy)]
pub struct TracingProgress {
    every: usize,
}

impl TracingProgress {
    /// Log a debug summary every `every` iterations (at least 1).
    pub fn new(every: usize) -> Self {
        Self {
            every: every.max(1),
        }
    }
}

impl Default for TracingProgress {
    fn default() -> Self {
        Self::new(100)
    }
}

impl<T: Scalar> ProgressObserver<T> for TracingProgress {
    fn on_initialized(&mut self, vertices: usize, best: T) {
        tracing::info!(vertices, best = %best, "Initialized simplex");
    }

    fn on_iteration(&mut self, iteration: usize, step: SimplexStep, best: T) {
        tracing::trace!(iteration, step = %step, best = %best, "Simplex step");
        if iteration % self.every == 0 {
            tracing::debug!(iteration, best = %best, "Simplex progress");
        }
    }

    fn on_finished(&mut self, iterations: usize, converged: bool, best: T) {
        if converged {
            tracing::info!(iterations, best = %best, "Simplex converged");
        } else {
            tracing::warn!(iterations, best = %best, "Simplex stopped at iteration cap");
        }
    }
}
