//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod fit;
pub mod sample;

use std::str::FromStr;

use crate::CliError;

/// Output formats shared by every command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: json, csv, table",
                other
            ))),
        }
    }
}

/// Render rows as a boxed table with right-aligned 14-character columns.
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let rule = |left: &str, mid: &str, right: &str| {
        let cells: Vec<String> = headers.iter().map(|_| "─".repeat(16)).collect();
        format!("{}{}{}\n", left, cells.join(mid), right)
    };
    let line = |cells: &[String]| {
        let cells: Vec<String> = cells.iter().map(|c| format!(" {:>14} ", c)).collect();
        format!("│{}│\n", cells.join("│"))
    };

    let mut out = rule("┌", "┬", "┐");
    out.push_str(&line(&headers.iter().map(|h| h.to_string()).collect::<Vec<_>>()));
    out.push_str(&rule("├", "┼", "┤"));
    for row in rows {
        out.push_str(&line(row));
    }
    out.push_str(&rule("└", "┴", "┘"));
    out
}

fn render_csv(headers: &[&str], rows: &[Vec<String>]) -> crate::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| CliError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| CliError::InvalidArgument(e.to_string()))
}
