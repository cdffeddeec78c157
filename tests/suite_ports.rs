mod common;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use common::{FakeGenerator, FakePredictor, FakeValidator};
use fleetcheck::config::Config;
use fleetcheck::ports::{RecordValidator, TrainRecord, ValidationReport};
use fleetcheck::suite::{prediction, synthetic, validation};

#[tokio::test]
async fn validation_category_passes_with_a_conforming_validator() {
    let config = Config::default();
    let result = validation::run(&FakeValidator, &config).await;
    assert!(result.success, "details: {:?}", result.details);
    // accepted + count preserved + rejected + errors reported + availability
    assert_eq!(result.total_tests, 5);
}

#[tokio::test]
async fn synthetic_category_passes_with_a_conforming_generator() {
    let config = Config::default();
    let generator = FakeGenerator {
        fleet_size: config.fleet_size,
        retention_days: config.retention_days,
    };
    let result = synthetic::run(&generator, &config).await;
    assert!(result.success, "details: {:?}", result.details);
    assert_eq!(result.total_tests, 7);
}

#[tokio::test]
async fn synthetic_category_flags_a_short_fleet() {
    let config = Config::default();
    let generator = FakeGenerator {
        fleet_size: 10,
        retention_days: config.retention_days,
    };
    let result = synthetic::run(&generator, &config).await;
    assert!(!result.success);
    let size_probe = result
        .details
        .iter()
        .find(|d| d.description == "Fleet status generated")
        .unwrap();
    assert!(!size_probe.passed);
}

#[tokio::test]
async fn prediction_category_passes_with_in_contract_values() {
    let result = prediction::run(&FakePredictor).await;
    assert!(result.success, "details: {:?}", result.details);
    // load + 3 structure + 2 ranges + 2 batch
    assert_eq!(result.total_tests, 8);
}

struct BrokenValidator;

#[async_trait]
impl RecordValidator for BrokenValidator {
    async fn validate_records(&self, _records: &[TrainRecord]) -> Result<ValidationReport> {
        Err(anyhow!("connection refused"))
    }

    async fn fleet_availability_ok(&self, _records: &[TrainRecord]) -> Result<bool> {
        Err(anyhow!("connection refused"))
    }
}

#[tokio::test]
async fn unreachable_validator_fails_probes_without_crashing() {
    let config = Config::default();
    let result = validation::run(&BrokenValidator, &config).await;
    assert!(!result.success);
    assert_eq!(result.tests_passed, 0);
    assert!(
        result.warnings.iter().any(|w| w.contains("connection refused")),
        "warnings: {:?}",
        result.warnings
    );
}
