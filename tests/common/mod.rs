use anyhow::Result;
use async_trait::async_trait;
use fleetcheck::config::Config;
use fleetcheck::fixtures::TARGET_DATE;
use fleetcheck::ports::{
    BatchPrediction, DelayPredictor, FleetDataGenerator, FleetStatus, Prediction,
    RecordValidator, TrainRecord, ValidationReport,
};
use fleetcheck::probe::ProbeContext;
use serde_json::{Value, json};
use std::path::Path;
use std::time::Duration;

#[allow(dead_code)]
pub fn test_config(base_url: &str, project_root: &Path) -> Config {
    Config {
        base_url: base_url.to_string(),
        project_root: project_root.to_path_buf(),
        request_timeout: Duration::from_secs(5),
        ..Config::default()
    }
}

#[allow(dead_code)]
pub fn context_for(config: &Config) -> ProbeContext {
    let client = fleetcheck::build_http_client(config.request_timeout).unwrap();
    ProbeContext::new(client, config)
}

/// Lays out a deployed project tree matching the default critical-file and
/// frontend expectations.
#[allow(dead_code)]
pub fn deployed_tree(root: &Path) {
    for dir in [
        "data",
        "backend/models",
        "backend/utils",
        "frontend/js",
        "frontend/css",
        "deployment",
    ] {
        std::fs::create_dir_all(root.join(dir)).unwrap();
    }
    for file in [
        "backend/main.py",
        "backend/models/cp_sat_solver.py",
        "backend/models/genetic_optimizer.py",
        "backend/models/ml_predictor.py",
        "data/generate_synthetic_data.py",
    ] {
        std::fs::write(root.join(file), "# deployed module\n").unwrap();
    }
    std::fs::write(
        root.join("frontend/index.html"),
        "<html><head><title>Fleet Dashboard</title>\
         <link rel=\"stylesheet\" href=\"css/style.css\"></head>\
         <body><script src=\"js/dashboard.js\"></script></body></html>",
    )
    .unwrap();
    std::fs::write(
        root.join("frontend/js/dashboard.js"),
        "class FleetDashboard {}\nfunction runOptimization() {}\nfunction loadTrainData() {}\n",
    )
    .unwrap();
    std::fs::write(root.join("frontend/css/style.css"), "body { margin: 0; }\n").unwrap();
}

/// A well-behaved 25-train optimization response: 18 SERVICE, 4 STANDBY,
/// 3 MAINTENANCE.
#[allow(dead_code)]
pub fn optimize_response(fleet_size: usize, service: usize) -> Value {
    let assignments: Vec<Value> = (1..=fleet_size)
        .map(|i| {
            let assignment = if i <= service {
                "SERVICE"
            } else if i <= service + 4 {
                "STANDBY"
            } else {
                "MAINTENANCE"
            };
            json!({ "train_id": format!("TRN-{i:03}"), "assignment": assignment })
        })
        .collect();
    json!({
        "optimization_id": "opt-20241002-001",
        "assignments": assignments,
        "objectives_achieved": { "service_readiness": 0.95 },
    })
}

/// Validator fake applying the same rules the suite's fixtures are built
/// around: parseable dates, unexpired certificates, non-negative mileage.
#[allow(dead_code)]
pub struct FakeValidator;

#[allow(dead_code)]
fn record_errors(record: &TrainRecord) -> Vec<String> {
    let mut errors = Vec::new();
    if record.last_service_date.parse::<chrono::NaiveDate>().is_err() {
        errors.push(format!("{}: unparseable service date", record.train_id));
    }
    if record.fitness_cert_valid_to.as_str() < TARGET_DATE {
        errors.push(format!("{}: fitness certificate expired", record.train_id));
    }
    if record.mileage_since_overhaul < 0 {
        errors.push(format!("{}: negative mileage", record.train_id));
    }
    errors
}

#[async_trait]
impl RecordValidator for FakeValidator {
    async fn validate_records(&self, records: &[TrainRecord]) -> Result<ValidationReport> {
        let errors: Vec<String> = records.iter().flat_map(record_errors).collect();
        Ok(ValidationReport {
            valid: errors.is_empty(),
            cleaned_records: records.len(),
            errors,
            fleet_availability: None,
        })
    }

    async fn fleet_availability_ok(&self, records: &[TrainRecord]) -> Result<bool> {
        let capable = records
            .iter()
            .filter(|r| r.jobcard_status != "CRITICAL_OPEN" && record_errors(r).is_empty())
            .count();
        Ok(capable >= 18)
    }
}

/// Generator fake producing exactly the configured shape.
#[allow(dead_code)]
pub struct FakeGenerator {
    pub fleet_size: usize,
    pub retention_days: usize,
}

#[async_trait]
impl FleetDataGenerator for FakeGenerator {
    fn fleet_size(&self) -> usize {
        self.fleet_size
    }

    async fn current_status(&self) -> Result<FleetStatus> {
        let records: Vec<Value> = (1..=self.fleet_size)
            .map(|i| {
                json!({
                    "train_id": format!("TRN-{i:03}"),
                    "last_service_date": "2024-09-01",
                    "fitness_cert_valid_to": "2024-12-01",
                    "jobcard_status": "NONE",
                    "mileage_since_overhaul": 45_000,
                })
            })
            .collect();
        Ok(FleetStatus {
            records,
            service_capable: self.fleet_size.saturating_sub(5),
        })
    }

    async fn historical_volume(&self) -> Result<usize> {
        // a little short of fleet_size * retention_days, inside tolerance
        Ok(self.fleet_size * self.retention_days - 10)
    }

    async fn complete_dataset(&self) -> Result<Value> {
        Ok(json!({
            "trains": [],
            "historical_performance": [],
            "job_cards": [],
            "iot_sensors": [],
            "branding_contracts": [],
            "metadata": { "generated_at": "2024-10-01T00:00:00Z" },
        }))
    }
}

/// Predictor fake with in-contract values.
#[allow(dead_code)]
pub struct FakePredictor;

#[async_trait]
impl DelayPredictor for FakePredictor {
    async fn load_models(&self) -> Result<bool> {
        Ok(true)
    }

    async fn predict_train(&self, _train: &TrainRecord) -> Result<Prediction> {
        Ok(Prediction {
            delay_risk: Some(0.12),
            confidence: Some(0.87),
            risk_factors: Some(vec!["mileage".to_string()]),
            maintenance_urgency: Some(35.0),
        })
    }

    async fn predict_fleet(&self, trains: &[TrainRecord]) -> Result<BatchPrediction> {
        Ok(BatchPrediction {
            individual_predictions: Some(json!(vec![
                json!({ "delay_risk": 0.12 });
                trains.len()
            ])),
            aggregate_metrics: Some(json!({ "mean_delay_risk": 0.12 })),
        })
    }
}
