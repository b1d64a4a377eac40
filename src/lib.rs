//! `SparkQuant` - A CLI tool for assigning Tecan Spark concentrations to LIMS samples
//!
//! This library reads a Tecan Spark plate reader export attached to a LIMS
//! process, maps each well row to the input sample in that well, and writes
//! the concentration (optionally also converted to nM) onto the sample's
//! output artifact.

pub mod cli;
pub mod config;
pub mod error;
pub mod lims;
pub mod operations;
pub mod spark;
pub mod system;

use anyhow::Result;
use cli::Args;
use lims::HttpLims;
use operations::{AssignOperation, AssignSettings, AssignmentReport};
use system::RealSystem;

/// Main entry point for the sparkquant library
///
/// # Errors
///
/// Returns an error if the configuration is invalid or any step of the
/// assignment fails.
pub fn run(args: &Args) -> Result<AssignmentReport> {
    let settings = AssignSettings::from_args(args)?;

    let system = RealSystem;
    let credentials = config::resolve_credentials(&system, args)?;
    let lims = HttpLims::new(&credentials)?;

    AssignOperation::new(settings, &lims).execute()
}
