//! Lens CLI - Command Line Operations for Quadratic Splines
//!
//! This is the operational entry point for the lens spline library.
//!
//! # Commands
//!
//! - `lens sample <job.toml>` - Evaluate the spline described in a job file
//! - `lens fit <job.toml>` - Fit a uniform quadratic spline to observations
//!
//! Job files are TOML; see [`config`] for the layout.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use config::LogLevel;

/// Lens quadratic spline CLI
#[derive(Parser)]
#[command(name = "lens")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a spline on an even grid
    Sample {
        /// Path to the job file
        job: PathBuf,

        /// Number of grid points
        #[arg(short = 'n', long, default_value = "11")]
        points: usize,

        /// Output format (json, csv, table)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Fit spline knot values to observations
    Fit {
        /// Path to the job file
        job: PathBuf,

        /// Output format (json, csv, table)
        #[arg(short, long, default_value = "table")]
        format: String,
    },
}

fn init_tracing(log_level: LogLevel) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level.as_filter_str())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::from_str(&cli.log_level)?
    };
    init_tracing(log_level);
    debug!(%log_level, "Logging initialised");

    match cli.command {
        Commands::Sample {
            job,
            points,
            format,
        } => commands::sample::run(&job, points, &format)
            .with_context(|| format!("sampling {} failed", job.display()))?,
        Commands::Fit { job, format } => commands::fit::run(&job, &format)
            .with_context(|| format!("fitting {} failed", job.display()))?,
    }

    info!("Done");
    Ok(())
}
