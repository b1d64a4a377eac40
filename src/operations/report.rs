//! Assignment report and its output formats

use core::fmt::Write as _;
use core::str::FromStr;

use anyhow::Result;
use serde::Serialize;

/// Output format for the assignment report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum OutputFormat {
    /// Human readable summary
    Text,
    /// Pretty printed JSON document
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {s}. Use 'text' or 'json'")),
        }
    }
}

/// One UDF assignment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub well: String,
    pub row: u32,
    pub sample: String,
    /// LIMS id of the output artifact that was updated
    pub artifact: String,
    pub concentration: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concentration_nm: Option<f64>,
}

/// Everything written (or, in a dry run, planned) for a process
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentReport {
    pub process: String,
    pub dry_run: bool,
    pub concentration_udf: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concentration_udf_nm: Option<String>,
    pub assignments: Vec<Assignment>,
}

/// Render a report in the requested format
///
/// # Errors
///
/// Returns an error if the report cannot be serialized to JSON
#[inline]
pub fn render_report(report: &AssignmentReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format_as_text(report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

fn format_as_text(report: &AssignmentReport) -> String {
    let mut text = String::new();
    for assignment in &report.assignments {
        let _ = write!(
            text,
            "{}\t{}\t{} = {}",
            assignment.well, assignment.sample, report.concentration_udf, assignment.concentration
        );
        if let (Some(udf), Some(nm)) = (
            report.concentration_udf_nm.as_ref(),
            assignment.concentration_nm,
        ) {
            let _ = write!(text, "\t{udf} = {nm:.2}");
        }
        text.push('\n');
    }

    if report.dry_run {
        text.push_str("Dry run, nothing was written to the LIMS.");
    } else {
        text.push_str("Successful assignment!");
    }
    text
}
