use clap::Parser;
use fleetcheck::config::{self, Config};
use fleetcheck::orchestrator::Orchestrator;
use fleetcheck::probe::ProbeContext;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Fleetcheck — integration verification suite for the fleet optimization
/// backend.
///
/// Drives the backend's HTTP API and inspects its deployed artifacts across
/// ten test categories, prints a summary, persists a JSON report, and exits
/// 0 (all categories passed) or 1 (any failure).
#[derive(Parser, Debug)]
#[command(name = "fleetcheck", version, about)]
struct Cli {
    /// Path to an optional YAML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the backend under test (overrides config).
    #[arg(long)]
    base_url: Option<String>,

    /// Root of the deployed project tree (overrides config).
    #[arg(long)]
    project_root: Option<PathBuf>,

    /// Where to write the JSON report (overrides config).
    #[arg(long)]
    report: Option<PathBuf>,

    /// Enable verbose logging (sets RUST_LOG=debug).
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut cfg = match &cli.config {
        Some(path) => match config::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("error: loading config from {}: {e:#}", path.display());
                return ExitCode::from(1);
            }
        },
        None => Config::default(),
    };
    if let Some(base_url) = cli.base_url {
        cfg.base_url = base_url;
    }
    if let Some(project_root) = cli.project_root {
        cfg.project_root = project_root;
    }
    if let Some(report) = cli.report {
        cfg.report_path = report;
    }

    info!(
        base_url = %cfg.base_url,
        project_root = %cfg.project_root.display(),
        timeout_secs = cfg.request_timeout.as_secs(),
        "starting fleetcheck"
    );

    let client = match fleetcheck::build_http_client(cfg.request_timeout) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::from(1);
        }
    };
    let cx = ProbeContext::new(client, &cfg);
    let report_path = cfg.report_path.clone();

    let report = Orchestrator::over_http(cx, cfg).run().await;
    report.print();

    // persistence trouble is the reporter's problem, not the backend's
    match report.persist(&report_path) {
        Ok(()) => println!("Detailed report saved to: {}", report_path.display()),
        Err(e) => warn!("could not save report: {e:#}"),
    }

    report.exit_code()
}
