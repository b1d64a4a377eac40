//! LIMS implementation over the REST API using blocking HTTP requests

use super::{Artifact, Lims, Process};
use crate::config::Credentials;
use crate::error::SparkError;
use anyhow::Result;
use core::time::Duration;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

/// API version prefix appended to the base URI
const API_PATH: &str = "api/v2";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Production implementation of the Lims trait
pub struct HttpLims {
    client: Client,
    api_root: String,
    username: String,
    password: String,
}

impl HttpLims {
    /// Create a client for the LIMS described by `credentials`
    ///
    /// # Errors
    ///
    /// Returns a LIMS error if the HTTP client cannot be built
    pub fn new(credentials: &Credentials) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SparkError::lims(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_root: api_root(&credentials.baseuri),
            username: credentials.username.clone(),
            password: credentials.password.clone(),
        })
    }

    /// Full URL of an API resource
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_root, path)
    }

    fn send(&self, method: &str, url: &str, request: RequestBuilder) -> Result<Response> {
        debug!("{method} {url}");
        let response = request
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .map_err(|e| SparkError::lims(format!("{method} {url} failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        Err(SparkError::lims(format!(
            "{method} {url} returned {status}: {}",
            error_message(&body)
        ))
        .into())
    }

    fn get_text(&self, path: &str) -> Result<String> {
        let url = self.url(path);
        let response = self.send("GET", &url, self.client.get(&url))?;
        response
            .text()
            .map_err(|e| SparkError::lims(format!("Failed to read response from {url}: {e}")).into())
    }
}

impl Lims for HttpLims {
    fn get_process(&self, pid: &str) -> Result<Process> {
        Process::from_xml(&self.get_text(&format!("processes/{pid}"))?)
    }

    fn get_artifact(&self, limsid: &str) -> Result<Artifact> {
        Artifact::from_xml(&self.get_text(&format!("artifacts/{limsid}"))?)
    }

    fn get_file_contents(&self, file_id: &str) -> Result<Vec<u8>> {
        let url = self.url(&format!("files/{file_id}/download"));
        let response = self.send("GET", &url, self.client.get(&url))?;
        let bytes = response
            .bytes()
            .map_err(|e| SparkError::lims(format!("Failed to download {url}: {e}")))?;
        Ok(bytes.to_vec())
    }

    fn put_artifact(&self, artifact: &Artifact) -> Result<()> {
        let url = self.url(&format!("artifacts/{}", artifact.limsid));
        let body = artifact.to_xml()?;
        let request = self
            .client
            .put(&url)
            .header(CONTENT_TYPE, "application/xml")
            .body(body);
        self.send("PUT", &url, request)?;
        Ok(())
    }
}

/// API root for a base URI, e.g. `https://lims.example.com/api/v2`
#[must_use]
pub fn api_root(baseuri: &str) -> String {
    format!("{}/{API_PATH}", baseuri.trim_end_matches('/'))
}

/// Extract the `<message>` of a LIMS exception document, or the trimmed body
#[must_use]
pub fn error_message(body: &str) -> String {
    roxmltree::Document::parse(body)
        .ok()
        .and_then(|doc| {
            doc.descendants()
                .find(|n| n.has_tag_name("message"))
                .and_then(|n| n.text())
                .map(|text| text.trim().to_owned())
        })
        .unwrap_or_else(|| body.trim().to_owned())
}
