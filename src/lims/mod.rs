//! LIMS abstraction
//!
//! This module provides the trait for every interaction with the LIMS REST
//! API, together with the process and artifact records read from it. The
//! HTTP implementation is used in production; the mock keeps everything in
//! memory for tests.

use crate::spark::well::Well;
use anyhow::Result;

pub mod http;
pub mod mock;
pub mod xml;

pub use http::HttpLims;
pub use mock::MockLims;

/// Unified trait for LIMS operations
///
/// # Implementations
/// - `HttpLims`: Production implementation using blocking HTTP requests
/// - `MockLims`: Test implementation using in-memory storage
pub trait Lims: Send + Sync {
    /// Fetch a process (step) by LIMS id
    fn get_process(&self, pid: &str) -> Result<Process>;

    /// Fetch an artifact by LIMS id
    fn get_artifact(&self, limsid: &str) -> Result<Artifact>;

    /// Download the contents of an uploaded file
    fn get_file_contents(&self, file_id: &str) -> Result<Vec<u8>>;

    /// Write an artifact back, including any changed UDFs
    fn put_artifact(&self, artifact: &Artifact) -> Result<()>;
}

/// A LIMS process (workflow step) with its input/output map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub limsid: String,
    /// Unique input artifact ids, in document order
    pub inputs: Vec<String>,
    /// Unique output artifact ids, in document order
    pub outputs: Vec<String>,
}

impl Process {
    /// Parse a process XML document
    ///
    /// # Errors
    ///
    /// Returns a LIMS error if the document is not a process
    #[inline]
    pub fn from_xml(xml: &str) -> Result<Self> {
        xml::parse_process(xml)
    }
}

/// Artifact type as reported by the LIMS
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactType {
    Analyte,
    ResultFile,
    Other(String),
}

impl From<&str> for ArtifactType {
    fn from(value: &str) -> Self {
        match value {
            "Analyte" => Self::Analyte,
            "ResultFile" => Self::ResultFile,
            other => Self::Other(other.to_owned()),
        }
    }
}

/// A user-defined field on an artifact
#[derive(Debug, Clone, PartialEq)]
pub struct Udf {
    pub name: String,
    pub field_type: Option<String>,
    pub value: String,
}

/// A LIMS artifact: a sample or a file record
#[derive(Debug, Clone)]
pub struct Artifact {
    pub limsid: String,
    pub name: String,
    pub artifact_type: ArtifactType,
    /// Raw location value inside the container, e.g. `A:1`
    pub location: Option<String>,
    pub udfs: Vec<Udf>,
    /// Ids of the files attached to this artifact
    pub files: Vec<String>,
    raw: String,
    changed: Vec<String>,
}

impl Artifact {
    /// Parse an artifact XML document
    ///
    /// # Errors
    ///
    /// Returns a LIMS error if the document is not an artifact
    #[inline]
    pub fn from_xml(xml: &str) -> Result<Self> {
        let parsed = xml::parse_artifact(xml)?;
        Ok(Self {
            limsid: parsed.limsid,
            name: parsed.name,
            artifact_type: parsed.artifact_type,
            location: parsed.location,
            udfs: parsed.udfs,
            files: parsed.files,
            raw: xml.to_owned(),
            changed: Vec::new(),
        })
    }

    /// Well position of this artifact in its container
    #[must_use]
    pub fn well(&self) -> Option<Well> {
        self.location.as_deref().and_then(Well::parse_label)
    }

    /// Current value of a UDF
    #[must_use]
    pub fn udf(&self, name: &str) -> Option<&str> {
        self.udfs
            .iter()
            .find(|udf| udf.name == name)
            .map(|udf| udf.value.as_str())
    }

    /// Set a numeric UDF, adding it if the artifact does not carry it yet
    pub fn set_udf_numeric(&mut self, name: &str, value: f64) {
        let value = value.to_string();
        match self.udfs.iter_mut().find(|udf| udf.name == name) {
            Some(udf) => udf.value = value,
            None => self.udfs.push(Udf {
                name: name.to_owned(),
                field_type: Some("Numeric".to_owned()),
                value,
            }),
        }
        if !self.changed.iter().any(|changed| changed == name) {
            self.changed.push(name.to_owned());
        }
    }

    /// Names of the UDFs changed since the artifact was fetched
    #[must_use]
    pub fn changed_udfs(&self) -> &[String] {
        &self.changed
    }

    /// Serialize the artifact for a PUT, carrying the changed UDFs
    ///
    /// # Errors
    ///
    /// Returns an error if the original document cannot be re-read
    pub fn to_xml(&self) -> Result<String> {
        let updates: Vec<(&str, &str)> = self
            .changed
            .iter()
            .filter_map(|name| self.udf(name).map(|value| (name.as_str(), value)))
            .collect();
        xml::write_artifact_udfs(&self.raw, &updates)
    }
}
