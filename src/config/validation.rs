//! Configuration validation logic

use crate::config::{Config, Credentials};
use anyhow::{Result, anyhow};
use regex::Regex;

/// Validate a merged configuration and extract the credentials
///
/// # Errors
///
/// Returns an error if:
/// - Any of the base URI, username or password is missing or empty
/// - The base URI is not an http(s) URL
#[inline]
pub fn validate_config(config: Config) -> Result<Credentials> {
    let baseuri = require(config.baseuri, "baseuri", "--baseuri", "LIMS_BASEURI")?;
    let username = require(config.username, "username", "--username", "LIMS_USERNAME")?;
    let password = require(config.password, "password", "--password", "LIMS_PASSWORD")?;

    validate_baseuri(&baseuri)?;

    Ok(Credentials {
        baseuri: baseuri.trim_end_matches('/').to_owned(),
        username,
        password,
    })
}

/// Validate a LIMS base URI format
///
/// # Errors
///
/// Returns an error if the URI is not `http://host...` or `https://host...`
#[inline]
pub fn validate_baseuri(uri: &str) -> Result<()> {
    let regex = Regex::new(r"^https?://[^\s/]+(/\S*)?$")?;
    if regex.is_match(uri) {
        return Ok(());
    }

    Err(anyhow!(
        "Invalid LIMS base URI: '{uri}'\n\
        Expected a URL such as https://lims.example.com"
    ))
}

fn require(value: Option<String>, key: &str, flag: &str, env: &str) -> Result<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(anyhow!(
            "Missing LIMS {key}. Set '{key}' in the configuration file, pass {flag}, or set {env}"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(baseuri: &str) -> Config {
        Config {
            baseuri: Some(baseuri.to_owned()),
            username: Some("apiuser".to_owned()),
            password: Some("secret".to_owned()),
        }
    }

    #[test]
    fn test_valid_config() {
        let credentials = validate_config(config("https://lims.example.com/")).unwrap();
        assert_eq!(credentials.baseuri, "https://lims.example.com");
        assert_eq!(credentials.username, "apiuser");
    }

    #[test]
    fn test_invalid_baseuri() {
        let result = validate_config(config("lims.example.com"));
        assert!(result.unwrap_err().to_string().contains("Invalid LIMS base URI"));
    }

    #[test]
    fn test_missing_password() {
        let mut cfg = config("http://localhost:8080");
        cfg.password = Some("  ".to_owned());
        let result = validate_config(cfg);
        assert!(result.unwrap_err().to_string().contains("LIMS_PASSWORD"));
    }
}
