//! Nelder–Mead downhill simplex minimisation.
//!
//! # Algorithm
//!
//! For an argument of dimension `N` the solver keeps `N + 1` vertices sorted
//! by objective value. Each iteration replaces the worst vertex `x_h` using
//! the centroid `x_0` of all other vertices:
//!
//! ```text
//! reflect   x_r = x_0 + (x_0 - x_h)         accepted if f(x_l) <= f(x_r) < f(x_nh)
//! expand    x_e = x_0 + 2 (x_0 - x_h)       if f(x_r) < f(x_l), keep the better of x_e, x_r
//! contract  x_c = x_0 + (x_h - x_0) / 2     accepted if f(x_c) < f(x_h)
//! shrink    x_i = x_l + (x_i - x_l) / 2     for every vertex but the best
//! ```
//!
//! The solve stops once the two best values differ by at most the configured
//! tolerance.

use super::argument::SimplexFunctionArgument;
use super::config::SimplexConfig;
use super::function::SimplexFunction;
use super::pair::{compare_values, SimplexPair};
use super::progress::{NoProgress, ProgressObserver, SimplexStep, TracingProgress};
use crate::traits::{constant, Scalar};
use crate::types::SimplexError;
use std::cmp::Ordering;

/// Lifecycle of a [`SimplexSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    /// Constructed, not yet solved.
    Uninitialized,
    /// Evaluating the initial simplex.
    Initializing,
    /// Running simplex moves.
    Iterating,
    /// Plateau criterion satisfied.
    Converged,
    /// Stopped by the iteration cap before the plateau criterion held.
    Exhausted,
}

/// Result of a simplex solve.
#[derive(Debug, Clone)]
pub struct SimplexResult<T, A> {
    /// Best vertex found.
    pub best: SimplexPair<T, A>,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the plateau criterion was met.
    pub converged: bool,
}

impl<T: Scalar, A: SimplexFunctionArgument<T>> SimplexResult<T, A> {
    /// Objective value at the best vertex.
    #[inline]
    pub fn value(&self) -> T {
        self.best.value
    }

    /// Best argument found.
    #[inline]
    pub fn argument(&self) -> &A {
        &self.best.argument
    }

    /// Take the best argument.
    pub fn into_argument(self) -> A {
        self.best.argument
    }
}

/// Derivative-free minimiser over any [`SimplexFunctionArgument`].
///
/// # Example
///
/// ```
/// use lens_core::math::solvers::{
///     SimplexConfig, SimplexFunctionArgument, SimplexSolver, VectorArgument,
/// };
///
/// let objective = |x: &VectorArgument<f64>| (x.get(0) - 3.0).powi(2);
/// let mut solver = SimplexSolver::new(
///     objective,
///     VectorArgument::from(vec![0.0]),
///     SimplexConfig::new(1.0, 1e-10),
/// )
/// .unwrap();
///
/// let result = solver.solve().unwrap();
/// assert!(result.converged);
/// assert!((result.argument().get(0) - 3.0).abs() < 1e-6);
/// ```
#[derive(Debug)]
pub struct SimplexSolver<T, A, F>
where
    T: Scalar,
    A: SimplexFunctionArgument<T>,
    F: SimplexFunction<T, A>,
{
    function: F,
    initial: A,
    config: SimplexConfig<T>,
    simplex: Vec<SimplexPair<T, A>>,
    state: SolverState,
    iterations: usize,
}

impl<T, A, F> SimplexSolver<T, A, F>
where
    T: Scalar,
    A: SimplexFunctionArgument<T>,
    F: SimplexFunction<T, A>,
{
    /// Create a solver minimising `function` starting from `initial`.
    ///
    /// # Errors
    ///
    /// * `SimplexError::EmptyArgument` - `initial` has dimension zero
    /// * `SimplexError::InvalidStep` - `lambda` is zero or non-finite
    /// * `SimplexError::InvalidTolerance` - `tolerance` is negative or non-finite
    pub fn new(function: F, initial: A, config: SimplexConfig<T>) -> Result<Self, SimplexError> {
        if initial.dimension() == 0 {
            return Err(SimplexError::EmptyArgument);
        }
        config.validate()?;

        Ok(Self {
            function,
            initial,
            config,
            simplex: Vec::new(),
            state: SolverState::Uninitialized,
            iterations: 0,
        })
    }

    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> SolverState {
        self.state
    }

    /// Solver configuration.
    #[inline]
    pub fn config(&self) -> &SimplexConfig<T> {
        &self.config
    }

    /// The objective.
    #[inline]
    pub fn function(&self) -> &F {
        &self.function
    }

    /// Vertices of the most recent solve, best first.
    #[inline]
    pub fn simplex(&self) -> &[SimplexPair<T, A>] {
        &self.simplex
    }

    /// Iterations performed by the most recent solve.
    #[inline]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Search for a local minimum.
    ///
    /// Progress is reported through `tracing` when
    /// [`SimplexConfig::report_progress`] is set.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by [`SimplexFunction::pre_compute`].
    pub fn solve(&mut self) -> Result<SimplexResult<T, A>, SimplexError> {
        if self.config.report_progress {
            self.solve_with(&mut TracingProgress::default())
        } else {
            self.solve_with(&mut NoProgress)
        }
    }

    /// Search for a local minimum, reporting progress to `observer`.
    ///
    /// Every call starts again from the initial argument.
    pub fn solve_with<O>(&mut self, observer: &mut O) -> Result<SimplexResult<T, A>, SimplexError>
    where
        O: ProgressObserver<T> + ?Sized,
    {
        self.iterations = 0;
        self.state = SolverState::Initializing;
        if let Err(err) = self.initialize() {
            self.state = SolverState::Uninitialized;
            return Err(err);
        }
        observer.on_initialized(self.simplex.len(), self.simplex[0].value);

        self.state = SolverState::Iterating;
        loop {
            if self.has_converged() {
                self.state = SolverState::Converged;
                break;
            }
            if self
                .config
                .max_iterations
                .is_some_and(|cap| self.iterations >= cap)
            {
                self.state = SolverState::Exhausted;
                break;
            }

            self.iterations += 1;
            let step = match self.step() {
                Ok(step) => step,
                Err(err) => {
                    self.state = SolverState::Uninitialized;
                    return Err(err);
                }
            };
            self.sort();
            observer.on_iteration(self.iterations, step, self.simplex[0].value);
        }

        let converged = self.state == SolverState::Converged;
        let best = self.simplex[0].clone();
        observer.on_finished(self.iterations, converged, best.value);

        Ok(SimplexResult {
            best,
            iterations: self.iterations,
            converged,
        })
    }

    fn evaluate(&self, mut argument: A) -> Result<SimplexPair<T, A>, SimplexError> {
        self.function.pre_compute(&mut argument)?;
        let value = self.function.compute(&argument);
        Ok(SimplexPair::new(argument, value))
    }

    fn initialize(&mut self) -> Result<(), SimplexError> {
        let n = self.initial.dimension();
        let base = self.evaluate(self.initial.copy())?;

        let mut simplex = Vec::with_capacity(n + 1);
        for i in 0..n {
            let mut argument = base.argument.copy();
            argument.set(i, argument.get(i) + self.config.lambda);
            simplex.push(self.evaluate(argument)?);
        }
        simplex.insert(0, base);

        self.simplex = simplex;
        self.sort();
        Ok(())
    }

    fn sort(&mut self) {
        self.simplex.sort_by(|a, b| a.compare(b));
    }

    fn has_converged(&self) -> bool {
        (self.simplex[0].value - self.simplex[1].value).abs() <= self.config.tolerance
    }

    /// Centroid of every vertex except the worst.
    fn centroid(&self) -> A {
        let rest = &self.simplex[..self.simplex.len() - 1];
        let sum = rest[1..]
            .iter()
            .fold(rest[0].argument.copy(), |acc, pair| acc.add(&pair.argument));
        sum.div(T::from(rest.len()).unwrap_or_else(T::nan))
    }

    fn step(&mut self) -> Result<SimplexStep, SimplexError> {
        let last = self.simplex.len() - 1;
        let low = self.simplex[0].value;
        let next_high = self.simplex[last - 1].value;
        let high = self.simplex[last].value;

        let centroid = self.centroid();
        let worst = self.simplex[last].argument.copy();

        let reflected = self.evaluate(centroid.add(&centroid).sub(&worst))?;
        if compare_values(reflected.value, low) != Ordering::Less
            && compare_values(reflected.value, next_high) == Ordering::Less
        {
            self.simplex[last] = reflected;
            return Ok(SimplexStep::Reflect);
        }

        if compare_values(reflected.value, low) == Ordering::Less {
            let direction = centroid.sub(&worst).mul(constant(2.0));
            let expanded = self.evaluate(centroid.add(&direction))?;
            self.simplex[last] = if expanded.compare(&reflected) == Ordering::Less {
                expanded
            } else {
                reflected
            };
            return Ok(SimplexStep::Expand);
        }

        let direction = worst.sub(&centroid).mul(constant(0.5));
        let contracted = self.evaluate(centroid.add(&direction))?;
        if compare_values(contracted.value, high) == Ordering::Less {
            self.simplex[last] = contracted;
            return Ok(SimplexStep::Contract);
        }

        let best = self.simplex[0].argument.copy();
        for i in 1..=last {
            let toward = self.simplex[i].argument.sub(&best).mul(constant(0.5));
            self.simplex[i] = self.evaluate(best.add(&toward))?;
        }
        Ok(SimplexStep::Shrink)
    }
}

/// Run independent solves from several starting arguments.
///
/// Each start gets its own solver and its own clone of `function`. Results
/// are returned in the order of `starts`. With the `parallel` feature the
/// solves run on the rayon thread pool.
#[cfg(feature = "parallel")]
pub fn solve_independent<T, A, F>(
    function: &F,
    starts: Vec<A>,
    config: SimplexConfig<T>,
) -> Vec<Result<SimplexResult<T, A>, SimplexError>>
where
    T: Scalar,
    A: SimplexFunctionArgument<T> + Send,
    F: SimplexFunction<T, A> + Clone + Send + Sync,
{
    use rayon::prelude::*;

    starts
        .into_par_iter()
        .map(|start| SimplexSolver::new(function.clone(), start, config)?.solve())
        .collect()
}

/// Sequential fallback when the `parallel` feature is disabled.
#[cfg(not(feature = "parallel"))]
pub fn solve_independent<T, A, F>(
    function: &F,
    starts: Vec<A>,
    config: SimplexConfig<T>,
) -> Vec<Result<SimplexResult<T, A>, SimplexError>>
where
    T: Scalar,
    A: SimplexFunctionArgument<T> + Send,
    F: SimplexFunction<T, A> + Clone + Send + Sync,
{
    starts
        .into_iter()
        .map(|start| SimplexSolver::new(function.clone(), start, config)?.solve())
        .collect()
}
