//! Least-squares spline fitting with the simplex solver.
//!
//! The search space is the vector of knot y-values of a template spline.
//! Before each candidate is scored its values are written into the spline
//! and the spline is regenerated, so the objective always evaluates an
//! up-to-date curve.
//!
//! Curvature splines ignore knot values and cannot be fitted this way.

use super::solvers::{SimplexConfig, SimplexFunction, SimplexFunctionArgument, SimplexSolver};
use super::splines::Spline;
use crate::traits::Scalar;
use crate::types::{FitError, SimplexError, SplineError};

/// Simplex argument made of a spline's knot values.
///
/// Vector operations act on the values only; the spline travels along as a
/// template and is brought up to date by [`SplineArgument::sync`].
#[derive(Debug, Clone)]
pub struct SplineArgument<T: Scalar> {
    values: Vec<T>,
    spline: Box<dyn Spline<T>>,
}

impl<T: Scalar> SplineArgument<T> {
    /// Start from the spline's current knot values.
    pub fn new(spline: Box<dyn Spline<T>>) -> Self {
        Self {
            values: spline.knot_ys().to_vec(),
            spline,
        }
    }

    /// Start from explicit knot values.
    ///
    /// # Errors
    ///
    /// Returns `SplineError::KnotCountMismatch` if `values` does not have one
    /// entry per knot.
    pub fn with_values(spline: Box<dyn Spline<T>>, values: Vec<T>) -> Result<Self, SplineError> {
        if values.len() != spline.num_knots() {
            return Err(SplineError::KnotCountMismatch {
                left: spline.num_knots(),
                right: values.len(),
            });
        }
        Ok(Self { values, spline })
    }

    /// Knot values being searched over.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// The carried spline. Only reflects [`values`](Self::values) after
    /// [`sync`](Self::sync).
    #[inline]
    pub fn spline(&self) -> &dyn Spline<T> {
        self.spline.as_ref()
    }

    /// Take the carried spline.
    pub fn into_spline(self) -> Box<dyn Spline<T>> {
        self.spline
    }

    /// Write the values into the spline and regenerate it.
    pub fn sync(&mut self) -> Result<(), SplineError> {
        for (i, &value) in self.values.iter().enumerate() {
            self.spline.specify(i, value)?;
        }
        self.spline.generate()
    }

    fn with(&self, values: Vec<T>) -> Self {
        Self {
            values,
            spline: self.spline.clone(),
        }
    }
}

impl<T: Scalar> SimplexFunctionArgument<T> for SplineArgument<T> {
    #[inline]
    fn dimension(&self) -> usize {
        self.values.len()
    }

    #[inline]
    fn get(&self, i: usize) -> T {
        self.values[i]
    }

    #[inline]
    fn set(&mut self, i: usize, value: T) {
        self.values[i] = value;
    }

    fn add(&self, other: &Self) -> Self {
        self.with(
            self.values
                .iter()
                .zip(&other.values)
                .map(|(&l, &r)| l + r)
                .collect(),
        )
    }

    fn sub(&self, other: &Self) -> Self {
        self.with(
            self.values
                .iter()
                .zip(&other.values)
                .map(|(&l, &r)| l - r)
                .collect(),
        )
    }

    fn mul(&self, factor: T) -> Self {
        self.with(self.values.iter().map(|&v| v * factor).collect())
    }

    fn div(&self, divisor: T) -> Self {
        self.with(self.values.iter().map(|&v| v / divisor).collect())
    }
}

/// Sum of squared residuals between a spline and sample points.
#[derive(Debug, Clone, PartialEq)]
pub struct LeastSquaresFit<T> {
    xs: Vec<T>,
    ys: Vec<T>,
}

impl<T: Scalar> LeastSquaresFit<T> {
    /// Objective for samples `(xs[k], ys[k])`.
    ///
    /// # Errors
    ///
    /// * `FitError::SampleLengthMismatch` - `xs` and `ys` differ in length
    /// * `FitError::NoSamples` - no samples given
    pub fn new(xs: Vec<T>, ys: Vec<T>) -> Result<Self, FitError> {
        if xs.len() != ys.len() {
            return Err(FitError::SampleLengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        if xs.is_empty() {
            return Err(FitError::NoSamples);
        }
        Ok(Self { xs, ys })
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Always false for a constructed objective.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Sum of squared residuals of `spline` over the samples.
    ///
    /// Evaluation errors make the residual NaN, which the solver ranks worst.
    pub fn residual(&self, spline: &dyn Spline<T>) -> T {
        self.xs
            .iter()
            .zip(&self.ys)
            .fold(T::zero(), |acc, (&x, &y)| match spline.compute(x) {
                Ok(value) => acc + (value - y) * (value - y),
                Err(_) => T::nan(),
            })
    }
}

impl<T: Scalar> SimplexFunction<T, SplineArgument<T>> for LeastSquaresFit<T> {
    fn compute(&self, argument: &SplineArgument<T>) -> T {
        self.residual(argument.spline())
    }

    fn pre_compute(&self, argument: &mut SplineArgument<T>) -> Result<(), SimplexError> {
        argument.sync().map_err(SimplexError::from)
    }
}

/// Outcome of [`fit_spline`].
#[derive(Debug, Clone)]
pub struct FitReport<T: Scalar> {
    /// Generated spline at the best knot values found.
    pub spline: Box<dyn Spline<T>>,
    /// Sum of squared residuals of `spline`.
    pub residual: T,
    /// Solver iterations.
    pub iterations: usize,
    /// Whether the solver met its plateau criterion.
    pub converged: bool,
}

/// Fit the knot values of `template` to the samples `(xs, ys)`.
///
/// The search starts at the template's current knot values. Knot positions
/// are left untouched.
///
/// # Example
///
/// ```
/// use lens_core::math::fitting::fit_spline;
/// use lens_core::math::solvers::SimplexConfig;
/// use lens_core::math::splines::{QuadraticSpline, Spline};
///
/// let template = QuadraticSpline::with_knots(vec![0.0, 1.0, 2.0], vec![0.0; 3]).unwrap();
/// let xs: Vec<f64> = (0..=20).map(|i| i as f64 * 0.1).collect();
/// let ys: Vec<f64> = xs
///     .iter()
///     .map(|&x| if x < 1.0 { x * x } else { -3.0 * x * x + 8.0 * x - 4.0 })
///     .collect();
///
/// let report = fit_spline(&template, &xs, &ys, SimplexConfig::new(0.5, 1e-14)).unwrap();
/// assert!(report.converged);
/// assert!((report.spline.knot_ys()[1] - 1.0).abs() < 1e-4);
/// ```
pub fn fit_spline<T, S>(
    template: &S,
    xs: &[T],
    ys: &[T],
    config: SimplexConfig<T>,
) -> Result<FitReport<T>, FitError>
where
    T: Scalar,
    S: Spline<T> + ?Sized,
{
    let objective = LeastSquaresFit::new(xs.to_vec(), ys.to_vec())?;
    let start = SplineArgument::new(template.box_clone());

    tracing::debug!(
        knots = start.dimension(),
        samples = objective.len(),
        "Fitting spline knot values"
    );

    let mut solver = SimplexSolver::new(objective, start, config)?;
    let result = solver.solve()?;

    Ok(FitReport {
        residual: result.value(),
        iterations: result.iterations,
        converged: result.converged,
        spline: result.into_argument().into_spline(),
    })
}
