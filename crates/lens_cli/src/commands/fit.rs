//! Fit command implementation
//!
//! Fits the knot values of a uniform quadratic spline to the observations in
//! a job file with the simplex solver.

use std::path::Path;

use lens_core::math::fitting::fit_spline;
use lens_core::math::splines::Spline;
use serde::Serialize;
use tracing::{info, warn};

use super::{render_csv, render_table, OutputFormat};
use crate::config::JobConfig;
use crate::Result;

/// A fitted knot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FittedKnot {
    pub x: f64,
    pub y: f64,
}

/// Output of `lens fit`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitOutput {
    pub knots: Vec<FittedKnot>,
    pub residual: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Fit the `[fit]` table of `job` using its `[solver]` settings.
pub fn fit(job: &JobConfig) -> Result<FitOutput> {
    let observations = job.fit()?;
    let template = observations.template()?;
    let config = job.solver.to_config()?;

    let report = fit_spline(&template, &observations.xs, &observations.ys, config)?;
    if !report.converged {
        warn!(
            iterations = report.iterations,
            residual = report.residual,
            "Fit stopped at the iteration cap"
        );
    }

    let knots = report
        .spline
        .knot_xs()
        .iter()
        .zip(report.spline.knot_ys())
        .map(|(&x, &y)| FittedKnot { x, y })
        .collect();

    Ok(FitOutput {
        knots,
        residual: report.residual,
        iterations: report.iterations,
        converged: report.converged,
    })
}

/// Format a fit result
pub fn render(output: &FitOutput, format: OutputFormat) -> Result<String> {
    let headers = ["knot x", "knot y"];
    let rows: Vec<Vec<String>> = output
        .knots
        .iter()
        .map(|k| vec![format!("{:.6}", k.x), format!("{:.6}", k.y)])
        .collect();

    Ok(match format {
        OutputFormat::Table => format!(
            "{}residual: {:.6e}\niterations: {}\nconverged: {}",
            render_table(&headers, &rows),
            output.residual,
            output.iterations,
            output.converged
        ),
        OutputFormat::Csv => render_csv(&headers, &rows)?,
        OutputFormat::Json => serde_json::to_string_pretty(output)?,
    })
}

/// Run the fit command
pub fn run(job_path: &Path, format: &str) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    let job = JobConfig::from_file(job_path)?;

    info!(job = %job_path.display(), "Starting fit...");
    let output = fit(&job)?;
    println!("{}", render(&output, format)?);

    info!(
        residual = output.residual,
        iterations = output.iterations,
        "Fit complete"
    );
    Ok(())
}
