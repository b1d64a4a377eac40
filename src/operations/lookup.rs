//! Well and name based artifact lookup

use crate::lims::{Artifact, ArtifactType};
use crate::spark::Well;

/// First input analyte placed in `well`
#[must_use]
pub fn find_input_in_well(well: Well, inputs: &[Artifact]) -> Option<&Artifact> {
    inputs
        .iter()
        .find(|artifact| artifact.artifact_type == ArtifactType::Analyte && artifact.well() == Some(well))
}

/// First output named `name`
#[must_use]
pub fn find_output_by_name<'a>(name: &str, outputs: &'a mut [Artifact]) -> Option<&'a mut Artifact> {
    outputs.iter_mut().find(|artifact| artifact.name == name)
}
