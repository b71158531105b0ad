//! Job file configuration
//!
//! A job file is a TOML document with an optional `[spline]` table consumed by
//! `lens sample`, an optional `[fit]` table consumed by `lens fit`, and an
//! optional `[solver]` table tuning the simplex search.
//!
//! ```toml
//! [spline]
//! kind = "quadratic"
//! start = 0.0
//! end = 2.0
//! values = [0.0, 1.0, 0.0]
//!
//! [fit]
//! knots = 3
//! xs = [0.0, 0.5, 1.0, 1.5, 2.0]
//! ys = [0.0, 0.25, 1.0, 0.25, 0.0]
//!
//! [solver]
//! lambda = 0.5
//! tolerance = 1e-12
//! ```

use lens_core::math::solvers::SimplexConfig;
use lens_core::math::splines::{CurvatureSpline, GradientSpline, QuadraticSpline, Spline};
use lens_core::types::Interval;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

use crate::{CliError, Result};

/// Log levels accepted by `--log-level`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(CliError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Spline description, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase", deny_unknown_fields)]
pub enum SplineJob {
    /// Interpolating quadratic spline through `values`.
    ///
    /// Knots are spaced evenly over `[start, end]` unless explicit `xs` are given.
    Quadratic {
        start: f64,
        end: f64,
        values: Vec<f64>,
        #[serde(default)]
        xs: Option<Vec<f64>>,
    },
    /// Spline driven by knot slopes; closed when `y_n` is present.
    Gradient {
        start: f64,
        end: f64,
        y_0: f64,
        gradients: Vec<f64>,
        #[serde(default)]
        y_n: Option<f64>,
    },
    /// Spline driven by relative curvature weights between fixed end values.
    Curvature {
        start: f64,
        end: f64,
        y_0: f64,
        y_n: f64,
        curvatures: Vec<f64>,
    },
}

impl SplineJob {
    /// Short name of the spline variant
    pub fn kind(&self) -> &'static str {
        match self {
            SplineJob::Quadratic { .. } => "quadratic",
            SplineJob::Gradient { .. } => "gradient",
            SplineJob::Curvature { .. } => "curvature",
        }
    }

    /// Build and generate the described spline
    pub fn build(&self) -> Result<Box<dyn Spline<f64>>> {
        let mut spline: Box<dyn Spline<f64>> = match self {
            SplineJob::Quadratic {
                start,
                end,
                values,
                xs,
            } => match xs {
                Some(xs) => {
                    let interval = Interval::new(*start, *end)?;
                    if xs.first() != Some(&interval.start()) || xs.last() != Some(&interval.end()) {
                        return Err(CliError::InvalidJob(format!(
                            "explicit knots must run from {} to {}",
                            start, end
                        )));
                    }
                    Box::new(QuadraticSpline::with_knots(xs.clone(), values.clone())?)
                }
                None => {
                    let interval = Interval::new(*start, *end)?;
                    let mut spline = QuadraticSpline::uniform(values.len(), interval)?;
                    for (i, &y) in values.iter().enumerate() {
                        spline.specify(i, y)?;
                    }
                    Box::new(spline)
                }
            },
            SplineJob::Gradient {
                start,
                end,
                y_0,
                gradients,
                y_n,
            } => {
                let interval = Interval::new(*start, *end)?;
                let mut spline = match y_n {
                    Some(y_n) => GradientSpline::closed(gradients.len(), interval, *y_0, *y_n)?,
                    None => GradientSpline::open(gradients.len(), interval, *y_0)?,
                };
                for (i, &g) in gradients.iter().enumerate() {
                    spline.set_gradient(i, g)?;
                }
                Box::new(spline)
            }
            SplineJob::Curvature {
                start,
                end,
                y_0,
                y_n,
                curvatures,
            } => {
                let interval = Interval::new(*start, *end)?;
                let mut spline = CurvatureSpline::new(curvatures.len(), *y_0, *y_n, interval)?;
                for (i, &a) in curvatures.iter().enumerate() {
                    spline.set_curvature(i, a)?;
                }
                Box::new(spline)
            }
        };

        spline.generate()?;
        Ok(spline)
    }
}

/// Observations for a least-squares fit of a uniform quadratic spline
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FitJob {
    /// Number of knots in the fitted spline
    pub knots: usize,
    /// Sample abscissae
    pub xs: Vec<f64>,
    /// Sample ordinates
    pub ys: Vec<f64>,
    /// Left end of the spline interval; defaults to the smallest sample
    #[serde(default)]
    pub start: Option<f64>,
    /// Right end of the spline interval; defaults to the largest sample
    #[serde(default)]
    pub end: Option<f64>,
}

impl FitJob {
    /// Validate the observations
    pub fn validate(&self) -> Result<()> {
        if self.knots < 2 {
            return Err(CliError::InvalidJob(format!(
                "a fit needs at least 2 knots, got {}",
                self.knots
            )));
        }
        if self.xs.len() != self.ys.len() {
            return Err(CliError::InvalidJob(format!(
                "{} x-values but {} y-values",
                self.xs.len(),
                self.ys.len()
            )));
        }
        if self.xs.is_empty() {
            return Err(CliError::InvalidJob("no observations to fit".to_string()));
        }
        if self.xs.iter().chain(&self.ys).any(|v| !v.is_finite()) {
            return Err(CliError::InvalidJob("observations must be finite".to_string()));
        }
        Ok(())
    }

    /// Interval the fitted spline spans
    pub fn interval(&self) -> Result<Interval<f64>> {
        let lowest = self.xs.iter().copied().fold(f64::INFINITY, f64::min);
        let highest = self.xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Ok(Interval::new(
            self.start.unwrap_or(lowest),
            self.end.unwrap_or(highest),
        )?)
    }

    /// Uniform quadratic template seeded with the nearest observation at each knot
    pub fn template(&self) -> Result<QuadraticSpline<f64>> {
        self.validate()?;
        let mut spline = QuadraticSpline::uniform(self.knots, self.interval()?)?;
        let knot_xs = spline.knot_xs().to_vec();
        for (i, knot) in knot_xs.into_iter().enumerate() {
            let nearest = self
                .xs
                .iter()
                .zip(&self.ys)
                .min_by(|(a, _), (b, _)| (*a - knot).abs().total_cmp(&(*b - knot).abs()))
                .map(|(_, &y)| y)
                .unwrap_or(0.0);
            spline.specify(i, nearest)?;
        }
        Ok(spline)
    }
}

fn default_lambda() -> f64 {
    1.0
}

fn default_tolerance() -> f64 {
    1e-10
}

fn default_max_iterations() -> Option<usize> {
    Some(10_000)
}

/// Simplex settings for `lens fit`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolverJob {
    /// Initial simplex edge length
    #[serde(default = "default_lambda")]
    pub lambda: f64,
    /// Plateau tolerance between the best and second-best vertex
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Iteration cap
    #[serde(default = "default_max_iterations")]
    pub max_iterations: Option<usize>,
    /// Emit per-iteration progress events
    #[serde(default)]
    pub report_progress: bool,
}

impl Default for SolverJob {
    fn default() -> Self {
        Self {
            lambda: default_lambda(),
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
            report_progress: false,
        }
    }
}

impl SolverJob {
    /// Convert to a validated solver configuration
    pub fn to_config(&self) -> Result<SimplexConfig<f64>> {
        let config = SimplexConfig {
            lambda: self.lambda,
            tolerance: self.tolerance,
            max_iterations: self.max_iterations,
            report_progress: self.report_progress,
        };
        config
            .validate()
            .map_err(|e| CliError::InvalidJob(e.to_string()))?;
        Ok(config)
    }
}

/// A parsed job file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobConfig {
    /// Spline to sample
    #[serde(default)]
    pub spline: Option<SplineJob>,
    /// Observations to fit
    #[serde(default)]
    pub fit: Option<FitJob>,
    /// Solver settings
    #[serde(default)]
    pub solver: SolverJob,
}

impl JobConfig {
    /// Load a job from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    /// The `[spline]` table, required by `lens sample`
    pub fn spline(&self) -> Result<&SplineJob> {
        self.spline
            .as_ref()
            .ok_or_else(|| CliError::InvalidJob("job has no [spline] table".to_string()))
    }

    /// The `[fit]` table, required by `lens fit`
    pub fn fit(&self) -> Result<&FitJob> {
        self.fit
            .as_ref()
            .ok_or_else(|| CliError::InvalidJob("job has no [fit] table".to_string()))
    }
}

impl FromStr for JobConfig {
    type Err = CliError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let job: JobConfig = toml::from_str(s)?;
        if let Some(fit) = &job.fit {
            fit.validate()?;
        }
        job.solver.to_config()?;
        Ok(job)
    }
}
