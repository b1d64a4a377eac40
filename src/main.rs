//! # `SparkQuant`
//!
//! `SparkQuant` takes an output file from the Tecan Spark plate reader that
//! has been uploaded to a LIMS step and sets the relevant concentration UDF on
//! the samples in that step.
//!
//! ## Usage
//!
//! ```sh
//! sparkquant --pid 24-1234 \
//!     --sparkOutputFilename 'Spark HighSens File' \
//!     --concentrationUdf 'QuantIt HS Concentration'
//! ```
//!
//! With an additional nM UDF:
//! ```sh
//! sparkquant --pid 24-1234 \
//!     --sparkOutputFilename 'Spark HighSens File' \
//!     --concentrationUdf 'QuantIt HS Concentration' \
//!     --convertToNm --fragmentSize 620bp \
//!     --concentrationUdfNm 'QuantIt HS Concentration (nM)'
//! ```
//!
//! LIMS credentials are read from `~/.sparkquant.yaml` (or `--config`) and
//! may be overridden with `--baseuri`, `--username` and `--password`.

use anyhow::Result;
use clap::Parser as _;
use sparkquant::cli::Args;
use sparkquant::error::SparkError;
use sparkquant::operations::{OutputFormat, render_report};
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

fn exit_with(err: &anyhow::Error) -> ! {
    error!("{:#}", err);
    std::process::exit(
        err.downcast_ref::<SparkError>()
            .map_or(1, SparkError::exit_code),
    );
}

fn main() -> Result<()> {
    let args = Args::parse();

    let format = args
        .output_format
        .parse::<OutputFormat>()
        .unwrap_or_else(|err| {
            eprintln!("{err}");
            std::process::exit(1);
        });

    // Keep stdout clean for the JSON report
    let log_level = if format == OutputFormat::Json {
        "error"
    } else if args.verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_target(false).with_env_filter(filter).init();

    match sparkquant::run(&args) {
        Ok(report) => match render_report(&report, format) {
            Ok(output) => {
                println!("{output}");
                std::process::exit(0);
            }
            Err(err) => exit_with(&err),
        },
        Err(err) => exit_with(&err),
    }
}
