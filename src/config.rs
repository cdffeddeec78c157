use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Runtime configuration for a verification run.
///
/// Every field has a compiled default so the binary works with no flags
/// against a local deployment; an optional YAML file and CLI flags layer on
/// top of the defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root URL of the backend under test.
    pub base_url: String,
    /// Root of the deployed project tree for filesystem probes.
    pub project_root: PathBuf,
    /// Where the JSON run report is written.
    pub report_path: PathBuf,
    /// Per-request transport timeout.
    pub request_timeout: Duration,
    /// Ceiling for a single health request.
    pub health_latency_ceiling: Duration,
    /// Ceiling for a full-fleet optimization request.
    pub optimize_latency_ceiling: Duration,
    /// Ceiling for the full-fleet optimization issued under load testing.
    pub large_optimize_latency_ceiling: Duration,
    /// Number of trains the backend is configured for.
    pub fleet_size: usize,
    /// Minimum trains that must be assigned to service.
    pub min_service_trains: usize,
    /// Days of history the synthetic generator retains.
    pub retention_days: usize,
    /// Size of the concurrent health-probe batch.
    pub concurrent_probes: usize,
    /// Required success rate for the concurrent batch.
    pub concurrent_success_threshold: f64,
    /// Files that must exist in the deployed tree, relative to `project_root`.
    pub critical_files: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            project_root: PathBuf::from("."),
            report_path: PathBuf::from("fleetcheck_report.json"),
            request_timeout: Duration::from_secs(30),
            health_latency_ceiling: Duration::from_secs(1),
            optimize_latency_ceiling: Duration::from_secs(30),
            large_optimize_latency_ceiling: Duration::from_secs(60),
            fleet_size: 25,
            min_service_trains: 18,
            retention_days: 180,
            concurrent_probes: 5,
            concurrent_success_threshold: 0.8,
            critical_files: [
                "backend/main.py",
                "backend/models/cp_sat_solver.py",
                "backend/models/genetic_optimizer.py",
                "backend/models/ml_predictor.py",
                "frontend/index.html",
                "data/generate_synthetic_data.py",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl Config {
    /// Versioned API base under the configured host.
    pub fn api_base(&self) -> String {
        format!("{}/api/v1", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Deserialize)]
struct RawConfig {
    base_url: Option<String>,
    project_root: Option<PathBuf>,
    report_path: Option<PathBuf>,
    request_timeout: Option<String>,
    health_latency_ceiling: Option<String>,
    optimize_latency_ceiling: Option<String>,
    large_optimize_latency_ceiling: Option<String>,
    fleet_size: Option<usize>,
    min_service_trains: Option<usize>,
    retention_days: Option<usize>,
    concurrent_probes: Option<usize>,
    concurrent_success_threshold: Option<f64>,
    critical_files: Option<Vec<String>>,
}

pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();
    if let Some(ms) = s.strip_suffix("ms") {
        let val: u64 = ms.parse().context("invalid milliseconds value")?;
        return Ok(Duration::from_millis(val));
    }
    if let Some(secs) = s.strip_suffix('s') {
        let val: u64 = secs.parse().context("invalid seconds value")?;
        return Ok(Duration::from_secs(val));
    }
    if let Some(mins) = s.strip_suffix('m') {
        let val: u64 = mins.parse().context("invalid minutes value")?;
        return Ok(Duration::from_secs(val * 60));
    }
    bail!("unsupported duration format: {s:?} (use e.g. '30s', '2m', '500ms')")
}

pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    parse(&content)
}

pub fn parse(yaml: &str) -> Result<Config> {
    let raw: RawConfig = serde_yml::from_str(yaml).context("parsing YAML config")?;
    let mut config = Config::default();

    if let Some(v) = raw.base_url {
        config.base_url = v;
    }
    if let Some(v) = raw.project_root {
        config.project_root = v;
    }
    if let Some(v) = raw.report_path {
        config.report_path = v;
    }
    if let Some(v) = raw.request_timeout {
        config.request_timeout = parse_duration(&v).context("parsing request_timeout")?;
    }
    if let Some(v) = raw.health_latency_ceiling {
        config.health_latency_ceiling =
            parse_duration(&v).context("parsing health_latency_ceiling")?;
    }
    if let Some(v) = raw.optimize_latency_ceiling {
        config.optimize_latency_ceiling =
            parse_duration(&v).context("parsing optimize_latency_ceiling")?;
    }
    if let Some(v) = raw.large_optimize_latency_ceiling {
        config.large_optimize_latency_ceiling =
            parse_duration(&v).context("parsing large_optimize_latency_ceiling")?;
    }
    if let Some(v) = raw.fleet_size {
        config.fleet_size = v;
    }
    if let Some(v) = raw.min_service_trains {
        config.min_service_trains = v;
    }
    if let Some(v) = raw.retention_days {
        config.retention_days = v;
    }
    if let Some(v) = raw.concurrent_probes {
        config.concurrent_probes = v;
    }
    if let Some(v) = raw.concurrent_success_threshold {
        config.concurrent_success_threshold = v;
    }
    if let Some(v) = raw.critical_files {
        config.critical_files = v;
    }

    Ok(config)
}
