//! Assignment operation coordination

use crate::cli::Args;
use crate::error::SparkError;
use crate::lims::{Artifact, Lims};
use crate::operations::lookup::{find_input_in_well, find_output_by_name};
use crate::operations::report::{Assignment, AssignmentReport};
use crate::operations::spark_file::find_spark_file;
use crate::spark::{ng_per_ul_to_nm, parse_fragment_size, read_spark_readings};
use anyhow::{Context as _, Result};
use tracing::{debug, info, warn};

/// Settings for the additional nM concentration UDF
#[derive(Debug, Clone, PartialEq)]
pub struct NmConversion {
    pub udf: String,
    /// Average fragment size in bp
    pub fragment_size: f64,
}

/// Validated run settings
#[derive(Debug, Clone, PartialEq)]
pub struct AssignSettings {
    pub pid: String,
    pub concentration_udf: String,
    pub spark_output_filename: String,
    pub conversion: Option<NmConversion>,
    pub dry_run: bool,
}

impl AssignSettings {
    /// Validate the command-line flags
    ///
    /// # Errors
    ///
    /// Returns a configuration error if:
    /// - A required value is empty
    /// - `--convertToNm` is given without `--concentrationUdfNm`
    /// - The fragment size cannot be parsed
    pub fn from_args(args: &Args) -> Result<Self> {
        for (flag, value) in [
            ("--pid", &args.pid),
            ("--concentrationUdf", &args.concentration_udf),
            ("--sparkOutputFilename", &args.spark_output_filename),
        ] {
            if value.trim().is_empty() {
                return Err(SparkError::configuration(format!("{flag} cannot be empty")).into());
            }
        }

        let conversion = if args.convert_to_nm {
            let udf = args
                .concentration_udf_nm
                .as_ref()
                .filter(|udf| !udf.trim().is_empty())
                .ok_or_else(|| {
                    SparkError::configuration("--concentrationUdfNm is required with --convertToNm")
                })?;
            Some(NmConversion {
                udf: udf.clone(),
                fragment_size: parse_fragment_size(&args.fragment_size)?,
            })
        } else {
            if args.concentration_udf_nm.is_some() {
                warn!("--concentrationUdfNm is ignored without --convertToNm");
            }
            None
        };

        Ok(Self {
            pid: args.pid.clone(),
            concentration_udf: args.concentration_udf.clone(),
            spark_output_filename: args.spark_output_filename.clone(),
            conversion,
            dry_run: args.dry_run,
        })
    }
}

/// Input and output artifacts of a process
#[derive(Debug, Clone)]
pub struct ProcessArtifacts {
    pub inputs: Vec<Artifact>,
    pub outputs: Vec<Artifact>,
}

impl ProcessArtifacts {
    /// Fetch every unique input and output artifact of a process
    ///
    /// # Errors
    ///
    /// Returns an error if the process or any artifact cannot be fetched
    pub fn load(lims: &dyn Lims, pid: &str) -> Result<Self> {
        let process = lims
            .get_process(pid)
            .with_context(|| format!("Failed to fetch process {pid}"))?;
        debug!(
            "Process {} has {} inputs and {} outputs",
            process.limsid,
            process.inputs.len(),
            process.outputs.len()
        );

        let inputs = process
            .inputs
            .iter()
            .map(|limsid| lims.get_artifact(limsid))
            .collect::<Result<Vec<_>>>()
            .context("Failed to fetch process inputs")?;
        let outputs = process
            .outputs
            .iter()
            .map(|limsid| lims.get_artifact(limsid))
            .collect::<Result<Vec<_>>>()
            .context("Failed to fetch process outputs")?;

        Ok(Self { inputs, outputs })
    }
}

/// Coordinates the complete assignment run
#[non_exhaustive]
pub struct AssignOperation<'src> {
    settings: AssignSettings,
    lims: &'src dyn Lims,
}

impl<'src> AssignOperation<'src> {
    /// Create a new assignment operation
    #[must_use]
    #[inline]
    pub fn new(settings: AssignSettings, lims: &'src dyn Lims) -> Self {
        Self { settings, lims }
    }

    /// Execute the assignment
    ///
    /// Rows are written one at a time; an error stops the run and leaves
    /// earlier rows written.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The process, its artifacts or the Spark file cannot be fetched
    /// - The spreadsheet cannot be read or holds an invalid concentration
    /// - A well has no sample, or a sample has no output
    /// - Writing an artifact fails
    #[inline]
    pub fn execute(&self) -> Result<AssignmentReport> {
        let settings = &self.settings;
        info!("Assigning Spark concentrations for process {}", settings.pid);

        let mut artifacts = ProcessArtifacts::load(self.lims, &settings.pid)?;

        let contents = find_spark_file(
            self.lims,
            &artifacts.outputs,
            &settings.spark_output_filename,
        )?;
        let readings = read_spark_readings(&contents)?;
        if readings.is_empty() {
            warn!(
                "No well rows found in '{}', nothing to assign",
                settings.spark_output_filename
            );
        }

        let mut report = AssignmentReport {
            process: settings.pid.clone(),
            dry_run: settings.dry_run,
            concentration_udf: settings.concentration_udf.clone(),
            concentration_udf_nm: settings.conversion.as_ref().map(|c| c.udf.clone()),
            assignments: Vec::with_capacity(readings.len()),
        };

        for reading in &readings {
            let sample = find_input_in_well(reading.well, &artifacts.inputs)
                .ok_or_else(|| {
                    SparkError::well(format!(
                        "Cannot find sample at well position {}, row {}",
                        reading.label, reading.row
                    ))
                })?
                .name
                .clone();

            let output = find_output_by_name(&sample, &mut artifacts.outputs).ok_or_else(|| {
                SparkError::well(format!(
                    "Cannot find an output for sample '{sample}' at well position {}, row {}",
                    reading.label, reading.row
                ))
            })?;

            output.set_udf_numeric(&settings.concentration_udf, reading.concentration);
            let concentration_nm = settings.conversion.as_ref().map(|conversion| {
                let nm = ng_per_ul_to_nm(reading.concentration, conversion.fragment_size);
                output.set_udf_numeric(&conversion.udf, nm);
                nm
            });

            if settings.dry_run {
                info!(
                    "Would set {} on {} ({}) from well {}",
                    output.changed_udfs().join(", "),
                    sample,
                    output.limsid,
                    reading.well
                );
            } else {
                self.lims
                    .put_artifact(output)
                    .with_context(|| format!("Failed to update {} ({})", sample, output.limsid))?;
                debug!("Updated {} ({}) from well {}", sample, output.limsid, reading.well);
            }

            report.assignments.push(Assignment {
                well: reading.well.to_string(),
                row: reading.row,
                sample,
                artifact: output.limsid.clone(),
                concentration: reading.concentration,
                concentration_nm,
            });
        }

        info!(
            "Assigned {} concentrations for process {}",
            report.assignments.len(),
            settings.pid
        );
        Ok(report)
    }
}
