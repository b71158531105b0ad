//! Sample command implementation
//!
//! Builds the spline described in a job file and evaluates it on an even grid.

use std::path::Path;

use lens_core::math::splines::Spline;
use serde::Serialize;
use tracing::info;

use super::{render_csv, render_table, OutputFormat};
use crate::config::{JobConfig, SplineJob};
use crate::{CliError, Result};

/// One evaluated grid point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
    pub dy_dx: f64,
}

/// Output of `lens sample`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleOutput {
    pub kind: &'static str,
    pub start: f64,
    pub end: f64,
    pub points: Vec<SamplePoint>,
}

/// Evaluate the spline of `job` at `points` evenly spaced abscissae.
pub fn sample(job: &SplineJob, points: usize) -> Result<SampleOutput> {
    if points < 2 {
        return Err(CliError::InvalidArgument(format!(
            "at least 2 sample points are required, got {}",
            points
        )));
    }

    let spline = job.build()?;
    let interval = spline.interval();
    let step = interval.width() / (points - 1) as f64;

    let points = (0..points)
        .map(|i| {
            let x = interval.start() + step * i as f64;
            Ok(SamplePoint {
                x,
                y: spline.compute(x)?,
                dy_dx: spline.derivative(x)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SampleOutput {
        kind: job.kind(),
        start: interval.start(),
        end: interval.end(),
        points,
    })
}

/// Format sampled points
pub fn render(output: &SampleOutput, format: OutputFormat) -> Result<String> {
    let headers = ["x", "y", "dy/dx"];
    let rows: Vec<Vec<String>> = output
        .points
        .iter()
        .map(|p| vec![format!("{:.6}", p.x), format!("{:.6}", p.y), format!("{:.6}", p.dy_dx)])
        .collect();

    Ok(match format {
        OutputFormat::Table => render_table(&headers, &rows),
        OutputFormat::Csv => render_csv(&headers, &rows)?,
        OutputFormat::Json => serde_json::to_string_pretty(output)?,
    })
}

/// Run the sample command
pub fn run(job_path: &Path, points: usize, format: &str) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    let job = JobConfig::from_file(job_path)?;
    let spline = job.spline()?;

    info!(
        job = %job_path.display(),
        kind = spline.kind(),
        points,
        "Sampling spline"
    );

    let output = sample(spline, points)?;
    println!("{}", render(&output, format)?);

    info!("Sampling complete");
    Ok(())
}
