//! YAML configuration loading and parsing

use crate::config::Config;
use crate::error::SparkError;
use crate::system::System;
use anyhow::Result;
use std::path::Path;

/// Load and parse YAML configuration from file
///
/// # Errors
///
/// Returns a configuration error if the file is missing, unreadable, or not
/// valid YAML for [`Config`].
pub fn load_config(system: &dyn System, path: &str) -> Result<Config> {
    let path_obj = Path::new(path);

    if !system.is_file(path_obj) {
        return Err(SparkError::configuration(format!(
            "Configuration file not found: {path}\n\
            Create a ~/.sparkquant.yaml file or specify a different path with --config"
        ))
        .into());
    }

    let content = system.read_to_string(path_obj).map_err(|e| {
        return SparkError::configuration(format!(
            "Failed to read configuration file: {path}: {e}"
        ));
    })?;

    // An empty file is a valid, empty configuration
    if content.trim().is_empty() {
        return Ok(Config::default());
    }

    let config: Config = serde_yaml::from_str(&content).map_err(|e| {
        return SparkError::configuration(format!(
            "Failed to parse YAML configuration in file: {path}: {e}\n\
            Expected the keys 'baseuri', 'username' and 'password'"
        ));
    })?;

    Ok(config)
}
