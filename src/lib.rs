pub mod adapters;
pub mod config;
pub mod fixtures;
pub mod orchestrator;
pub mod ports;
pub mod probe;
pub mod report;
pub mod suite;

use std::time::Duration;

use anyhow::{Context, Result};

/// Builds the one HTTP client shared for the whole run.
///
/// The per-request timeout is a hard requirement: a hung backend must stall a
/// single probe, never the suite.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("building HTTP client")
}
