//! Spark output file retrieval

use crate::error::SparkError;
use crate::lims::{Artifact, ArtifactType, Lims};
use anyhow::Result;
use tracing::debug;

/// Download the Spark export attached to the `ResultFile` output named `filename`
///
/// # Errors
///
/// Returns a file error if:
/// - No `ResultFile` output has that name
/// - The output has no uploaded file
/// - The file cannot be downloaded
pub fn find_spark_file(lims: &dyn Lims, outputs: &[Artifact], filename: &str) -> Result<Vec<u8>> {
    let Some(artifact) = outputs
        .iter()
        .find(|artifact| artifact.artifact_type == ArtifactType::ResultFile && artifact.name == filename)
    else {
        return Err(SparkError::file(format!(
            "Cannot find the Spark output file '{filename}', are you sure it has been uploaded?"
        ))
        .into());
    };

    let inaccessible = |detail: &str| {
        return SparkError::file(format!(
            "Cannot access the Spark output file '{filename}' to read the concentrations ({detail}), \
            are you sure it has been uploaded?"
        ));
    };

    let file_id = artifact
        .files
        .first()
        .ok_or_else(|| inaccessible("no file attached"))?;
    debug!("Downloading Spark file {} from artifact {}", file_id, artifact.limsid);

    lims.get_file_contents(file_id)
        .map_err(|e| inaccessible(&e.to_string()).into())
}
