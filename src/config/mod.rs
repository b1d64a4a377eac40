//! Configuration management module
//!
//! Handles YAML credential files, CLI/environment overrides, and validation

pub mod validation;
pub mod yaml;

use crate::cli::Args;
use crate::error::SparkError;
use crate::system::System;
use core::fmt;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

/// Name of the credentials file looked up in the home directory
pub const DEFAULT_CONFIG_FILE: &str = ".sparkquant.yaml";

/// Credentials file contents; every field may be overridden on the command line
#[derive(Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// LIMS base URI, e.g. `https://lims.example.com`
    pub baseuri: Option<String>,

    /// API username
    pub username: Option<String>,

    /// API password
    pub password: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("baseuri", &self.baseuri)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Validated LIMS connection settings
#[derive(Clone)]
pub struct Credentials {
    pub baseuri: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("baseuri", &self.baseuri)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file(system: &dyn System, path: &str) -> anyhow::Result<Self> {
        yaml::load_config(system, path)
    }

    /// Apply CLI (or environment) overrides on top of the file values
    pub fn merge_args(&mut self, args: &Args) {
        if let Some(baseuri) = args.baseuri.as_ref() {
            self.baseuri = Some(baseuri.clone());
        }
        if let Some(username) = args.username.as_ref() {
            self.username = Some(username.clone());
        }
        if let Some(password) = args.password.as_ref() {
            self.password = Some(password.clone());
        }
    }

    /// Validate the merged configuration and turn it into credentials
    pub fn into_credentials(self) -> anyhow::Result<Credentials> {
        validation::validate_config(self)
    }
}

/// Resolve LIMS credentials from the configuration file and CLI overrides
///
/// An explicit `--config` path must exist. The default file in the home
/// directory is optional.
///
/// # Errors
///
/// Returns a configuration error if:
/// - An explicitly named configuration file does not exist or cannot be parsed
/// - The merged configuration is incomplete or invalid
pub fn resolve_credentials(system: &dyn System, args: &Args) -> anyhow::Result<Credentials> {
    let mut config = match args.config.as_ref() {
        Some(path) => Config::load_from_file(system, path)?,
        None => match default_config_path(system) {
            Some(path) if system.is_file(&path) => {
                debug!("Using configuration file {}", path.display());
                Config::load_from_file(system, &path.to_string_lossy())?
            }
            _ => {
                debug!("No configuration file found, using CLI and environment values");
                Config::default()
            }
        },
    };

    config.merge_args(args);
    debug!("Merged configuration: {:?}", config);

    config
        .into_credentials()
        .map_err(|e| SparkError::configuration(e.to_string()).into())
}

/// Default configuration file location: `~/.sparkquant.yaml`
#[must_use]
pub fn default_config_path(system: &dyn System) -> Option<PathBuf> {
    system.home_dir().map(|home| home.join(DEFAULT_CONFIG_FILE))
}
