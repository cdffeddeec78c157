use crate::config::Config;
use crate::report::CategoryResult;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

pub use reqwest::Method;

/// Outcome of one atomic check. Immutable once produced.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeOutcome {
    pub description: String,
    pub passed: bool,
}

/// Accumulates probe outcomes and warnings for one category.
///
/// The counts in the finished [`CategoryResult`] are derived from the recorded
/// outcomes, so `tests_passed <= total_tests == details.len()` holds by
/// construction.
#[derive(Debug, Default)]
pub struct Recorder {
    details: Vec<ProbeOutcome>,
    warnings: Vec<String>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, description: impl Into<String>, passed: bool) {
        let description = description.into();
        if !passed {
            debug!(probe = %description, "probe failed");
        }
        self.details.push(ProbeOutcome {
            description,
            passed,
        });
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Records a failing outcome together with a warning explaining it.
    pub fn fail_with_warning(
        &mut self,
        description: impl Into<String>,
        warning: impl Into<String>,
    ) {
        self.record(description, false);
        self.warn(warning);
    }

    pub fn finish(self) -> CategoryResult {
        CategoryResult::from_parts(self.details, self.warnings)
    }
}

/// Expected HTTP status for an endpoint probe.
#[derive(Debug, Clone)]
pub enum Expect {
    Status(u16),
    OneOf(&'static [u16]),
}

impl Expect {
    pub fn matches(&self, status: u16) -> bool {
        match self {
            Expect::Status(expected) => status == *expected,
            Expect::OneOf(expected) => expected.contains(&status),
        }
    }
}

impl fmt::Display for Expect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expect::Status(status) => write!(f, "{status}"),
            Expect::OneOf(statuses) => {
                let list: Vec<String> = statuses.iter().map(|s| s.to_string()).collect();
                write!(f, "one of [{}]", list.join(", "))
            }
        }
    }
}

/// Transport-level probe failure, kept distinct so a timed-out backend reads
/// differently from an unreachable one in the warnings.
#[derive(Debug)]
pub enum ProbeError {
    Timeout,
    Connection,
    Transport(String),
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProbeError::Timeout
        } else if err.is_connect() {
            ProbeError::Connection
        } else {
            ProbeError::Transport(format!("{err:#}"))
        }
    }
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::Timeout => write!(f, "request timed out"),
            ProbeError::Connection => write!(f, "connection refused"),
            ProbeError::Transport(msg) => write!(f, "transport error: {msg}"),
        }
    }
}

impl std::error::Error for ProbeError {}

/// Raw reply from an endpoint probe.
#[derive(Debug)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Shared state every probe needs: the one HTTP client for the run, the
/// resolved API base, and the deployed tree root for filesystem checks.
#[derive(Debug, Clone)]
pub struct ProbeContext {
    pub client: reqwest::Client,
    pub base_url: String,
    pub api_base: String,
    pub project_root: PathBuf,
}

impl ProbeContext {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            api_base: config.api_base(),
            project_root: config.project_root.clone(),
        }
    }

    /// Full URL for a path under the versioned API base.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }

    /// Issues a request and reads the whole body. Errors are classified but
    /// never propagated past the caller's probe boundary.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Reply, ProbeError> {
        let mut request = self.client.request(method, url);
        if let Some(json) = body {
            request = request.json(json);
        }
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(Reply { status, body })
    }

    /// Posts a raw body with a JSON content type, for malformed-payload probes.
    pub async fn post_raw(&self, url: &str, body: &'static str) -> Result<Reply, ProbeError> {
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(Reply { status, body })
    }

    /// Probes one endpoint against an expected status, recording the outcome.
    ///
    /// Returns the reply when the expectation held, so callers can run further
    /// schema checks on the body. Transport failures become a failing outcome
    /// plus a warning; a plain status mismatch records a failure only.
    pub async fn probe_endpoint(
        &self,
        rec: &mut Recorder,
        description: &str,
        method: Method,
        url: &str,
        body: Option<&serde_json::Value>,
        expect: &Expect,
    ) -> Option<Reply> {
        match self.request(method, url, body).await {
            Ok(reply) if expect.matches(reply.status) => {
                rec.record(description, true);
                Some(reply)
            }
            Ok(reply) => {
                rec.record(description, false);
                debug!(
                    probe = description,
                    expected = %expect,
                    got = reply.status,
                    "unexpected status"
                );
                None
            }
            Err(err) => {
                rec.fail_with_warning(description, format!("{description}: {err}"));
                None
            }
        }
    }

    pub fn dir_exists(&self, relative: &str) -> bool {
        self.project_root.join(relative).is_dir()
    }

    pub fn file_exists(&self, relative: &str) -> bool {
        self.project_root.join(relative).is_file()
    }

    /// Substring check inside a deployed file. An unreadable file counts as
    /// not containing the marker.
    pub fn file_contains(&self, relative: &str, needle: &str) -> bool {
        match std::fs::read_to_string(self.project_root.join(relative)) {
            Ok(content) => content.contains(needle),
            Err(_) => false,
        }
    }
}
