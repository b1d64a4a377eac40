//! Mock LIMS implementation for testing

#![expect(clippy::module_name_repetitions)]

use super::{Artifact, Lims, Process};
use crate::error::SparkError;
use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory implementation of the Lims trait for testing
///
/// Documents are stored as XML so every read goes through the same parsing
/// as the HTTP implementation. A PUT replaces the stored artifact and is
/// recorded.
///
/// # Example
/// ```
/// use sparkquant::lims::{Lims, mock::MockLims};
///
/// let lims = MockLims::new()
///     .with_artifact("2-1", r#"<art:artifact xmlns:art="http://genologics.com/ri/artifact" limsid="2-1"><name>S1</name><type>Analyte</type></art:artifact>"#)
///     .unwrap();
///
/// assert_eq!(lims.get_artifact("2-1").unwrap().name, "S1");
/// ```
#[derive(Clone)]
pub struct MockLims {
    state: Arc<RwLock<MockLimsState>>,
}

struct MockLimsState {
    processes: HashMap<String, String>,
    artifacts: HashMap<String, String>,
    files: HashMap<String, Vec<u8>>,
    puts: Vec<String>,
}

impl MockLims {
    /// Create an empty `MockLims`
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MockLimsState {
                processes: HashMap::new(),
                artifacts: HashMap::new(),
                files: HashMap::new(),
                puts: Vec::new(),
            })),
        }
    }

    /// Add a process document (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned
    #[inline]
    pub fn with_process(self, pid: &str, xml: &str) -> Result<Self> {
        let mut state = self.state.write().map_err(|e| anyhow!(e.to_string()))?;
        state.processes.insert(pid.to_owned(), xml.to_owned());
        drop(state);
        Ok(self)
    }

    /// Add an artifact document (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned
    #[inline]
    pub fn with_artifact(self, limsid: &str, xml: &str) -> Result<Self> {
        let mut state = self.state.write().map_err(|e| anyhow!(e.to_string()))?;
        state.artifacts.insert(limsid.to_owned(), xml.to_owned());
        drop(state);
        Ok(self)
    }

    /// Add downloadable file contents (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned
    #[inline]
    pub fn with_file(self, file_id: &str, contents: &[u8]) -> Result<Self> {
        let mut state = self.state.write().map_err(|e| anyhow!(e.to_string()))?;
        state.files.insert(file_id.to_owned(), contents.to_vec());
        drop(state);
        Ok(self)
    }

    /// XML bodies of every PUT, in order
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned
    #[inline]
    pub fn puts(&self) -> Result<Vec<String>> {
        let state = self.state.read().map_err(|e| anyhow!(e.to_string()))?;
        Ok(state.puts.clone())
    }
}

impl Default for MockLims {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Lims for MockLims {
    #[inline]
    fn get_process(&self, pid: &str) -> Result<Process> {
        let state = self.state.read().map_err(|e| anyhow!(e.to_string()))?;
        let xml = state
            .processes
            .get(pid)
            .ok_or_else(|| SparkError::lims(format!("Process not found: {pid}")))?;
        Process::from_xml(xml)
    }

    #[inline]
    fn get_artifact(&self, limsid: &str) -> Result<Artifact> {
        let state = self.state.read().map_err(|e| anyhow!(e.to_string()))?;
        let xml = state
            .artifacts
            .get(limsid)
            .ok_or_else(|| SparkError::lims(format!("Artifact not found: {limsid}")))?;
        Artifact::from_xml(xml)
    }

    #[inline]
    fn get_file_contents(&self, file_id: &str) -> Result<Vec<u8>> {
        let state = self.state.read().map_err(|e| anyhow!(e.to_string()))?;
        state
            .files
            .get(file_id)
            .cloned()
            .ok_or_else(|| SparkError::lims(format!("File not found: {file_id}")).into())
    }

    #[inline]
    fn put_artifact(&self, artifact: &Artifact) -> Result<()> {
        let xml = artifact.to_xml()?;
        let mut state = self.state.write().map_err(|e| anyhow!(e.to_string()))?;
        if !state.artifacts.contains_key(&artifact.limsid) {
            return Err(SparkError::lims(format!("Artifact not found: {}", artifact.limsid)).into());
        }
        state.artifacts.insert(artifact.limsid.clone(), xml.clone());
        state.puts.push(xml);
        drop(state);
        Ok(())
    }
}
