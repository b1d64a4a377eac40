//! Custom error types with exit codes

use thiserror::Error;

/// Main error type for sparkquant operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SparkError {
    /// Configuration Error - missing or invalid flags or credentials
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// LIMS Error - a request to the LIMS failed or returned unexpected data
    #[error("LIMS error: {message}")]
    Lims { message: String },

    /// File Error - the Spark output file is missing or cannot be downloaded
    #[error("File error: {message}")]
    File { message: String },

    /// Sheet Error - the spreadsheet cannot be read
    #[error("Sheet error: {message}")]
    Sheet { message: String },

    /// Well Error - no sample matches a well in the spreadsheet
    #[error("Well error: {message}")]
    Well { message: String },

    /// Concentration Error - a cell holds an unrecognized concentration
    #[error("Concentration error: {message}")]
    Concentration { message: String },
}

impl SparkError {
    /// Get the appropriate exit code for this error type
    #[must_use]
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match *self {
            Self::Configuration { .. } => 1,
            Self::Lims { .. } => 2,
            Self::File { .. } => 3,
            Self::Sheet { .. } => 4,
            Self::Well { .. } => 5,
            Self::Concentration { .. } => 6,
        }
    }

    /// Create a configuration error
    #[inline]
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a LIMS error
    #[inline]
    pub fn lims<S: Into<String>>(message: S) -> Self {
        Self::Lims {
            message: message.into(),
        }
    }

    /// Create a file error
    #[inline]
    pub fn file<S: Into<String>>(message: S) -> Self {
        Self::File {
            message: message.into(),
        }
    }

    /// Create a sheet error
    #[inline]
    pub fn sheet<S: Into<String>>(message: S) -> Self {
        Self::Sheet {
            message: message.into(),
        }
    }

    /// Create a well error
    #[inline]
    pub fn well<S: Into<String>>(message: S) -> Self {
        Self::Well {
            message: message.into(),
        }
    }

    /// Create a concentration error
    #[inline]
    pub fn concentration<S: Into<String>>(message: S) -> Self {
        Self::Concentration {
            message: message.into(),
        }
    }
}
