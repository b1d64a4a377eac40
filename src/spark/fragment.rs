//! Fragment size parsing

use crate::error::SparkError;
use anyhow::Result;
use regex::Regex;

/// Parse a DNA fragment size such as `620bp`, `620 bp` or `620`
///
/// # Errors
///
/// Returns a configuration error if the text is not a positive number of
/// base pairs
pub fn parse_fragment_size(text: &str) -> Result<f64> {
    let regex = Regex::new(r"(?i)^\s*([0-9]+)\s*(?:bp)?\s*$")?;

    let size = regex
        .captures(text)
        .and_then(|captures| captures.get(1))
        .and_then(|digits| digits.as_str().parse::<u32>().ok())
        .filter(|size| *size > 0);

    match size {
        Some(size) => Ok(f64::from(size)),
        None => Err(SparkError::configuration(format!(
            "Invalid fragment size '{text}'! Please specify the fragment size in the format '620' or '620bp'"
        ))
        .into()),
    }
}
