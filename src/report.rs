use crate::probe::ProbeOutcome;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::path::Path;
use std::process::ExitCode;

/// Aggregated outcome of one category runner. Read-only once built.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryResult {
    pub success: bool,
    pub total_tests: usize,
    pub tests_passed: usize,
    pub details: Vec<ProbeOutcome>,
    pub warnings: Vec<String>,
    /// Set only for the synthetic result of a runner that crashed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CategoryResult {
    /// Builds a result from recorded outcomes; the counts are derived, never
    /// supplied by the caller.
    pub fn from_parts(details: Vec<ProbeOutcome>, warnings: Vec<String>) -> Self {
        let total_tests = details.len();
        let tests_passed = details.iter().filter(|d| d.passed).count();
        Self {
            success: tests_passed == total_tests,
            total_tests,
            tests_passed,
            details,
            warnings,
            error: None,
        }
    }

    /// Synthetic one-test failure standing in for a runner that crashed
    /// outside its own probes.
    pub fn defect(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            success: false,
            total_tests: 1,
            tests_passed: 0,
            details: vec![ProbeOutcome {
                description: "category completed without internal error".to_string(),
                passed: false,
            }],
            warnings: vec![message.clone()],
            error: Some(message),
        }
    }
}

/// The full run's aggregated outcome, printed and persisted once at run end.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub timestamp: DateTime<Utc>,
    pub overall_success: bool,
    pub total_tests: usize,
    pub total_passed: usize,
    pub success_rate: f64,
    #[serde(serialize_with = "serialize_ordered")]
    pub test_results: Vec<(String, CategoryResult)>,
}

/// `test_results` serializes as a JSON object in category execution order.
fn serialize_ordered<S: Serializer>(
    entries: &Vec<(String, CategoryResult)>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(entries.len()))?;
    for (name, result) in entries {
        map.serialize_entry(name, result)?;
    }
    map.end()
}

impl RunReport {
    /// Pure fold over category results; no state is accumulated by side
    /// effect anywhere upstream.
    pub fn from_categories(test_results: Vec<(String, CategoryResult)>) -> Self {
        let total_tests: usize = test_results.iter().map(|(_, r)| r.total_tests).sum();
        let total_passed: usize = test_results.iter().map(|(_, r)| r.tests_passed).sum();
        let overall_success = test_results.iter().all(|(_, r)| r.success);
        let success_rate = if total_tests > 0 {
            total_passed as f64 / total_tests as f64
        } else {
            0.0
        };
        Self {
            timestamp: Utc::now(),
            overall_success,
            total_tests,
            total_passed,
            success_rate,
            test_results,
        }
    }

    /// Prints the human-readable summary to stdout: one line per category,
    /// warnings indented beneath, then the totals and a closing verdict.
    pub fn print(&self) {
        println!("TEST REPORT");
        println!("{}", "=".repeat(60));
        println!(
            "Overall Status: {}",
            if self.overall_success {
                "PASSED"
            } else {
                "FAILED"
            }
        );
        println!();

        for (name, result) in &self.test_results {
            let marker = if result.success { "PASS" } else { "FAIL" };
            println!(
                "{marker} {name}: {}/{}",
                result.tests_passed, result.total_tests
            );
            for warning in &result.warnings {
                println!("    warning: {warning}");
            }
        }

        println!();
        println!(
            "Summary: {}/{} tests passed ({:.1}%)",
            self.total_passed,
            self.total_tests,
            self.success_rate * 100.0
        );
        println!();

        if self.overall_success {
            println!("All categories passed. System is ready.");
        } else {
            println!("Some categories failed. Review the report before release.");
        }
    }

    /// Persists the report as pretty JSON. The caller downgrades a failure
    /// here to a logged warning; it never changes the run's verdict.
    pub fn persist(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("serializing run report")?;
        std::fs::write(path, json)
            .with_context(|| format!("writing report to {}", path.display()))?;
        Ok(())
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.overall_success {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}
