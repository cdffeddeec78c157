//! Ports for the backend collaborators the suite exercises beyond plain
//! endpoint probes. Each category that needs one receives it at construction
//! time, so every runner is testable against a substitute implementation.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One fleet unit as the backend's API understands it. Optional fields are
/// omitted from the serialized record, matching payloads the backend accepts
/// with partial data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainRecord {
    pub train_id: String,
    pub last_service_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fitness_cert_valid_from: Option<String>,
    pub fitness_cert_valid_to: String,
    pub jobcard_status: String,
    pub mileage_since_overhaul: i64,
    pub crew_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branding_exposure_hours: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iot_sensor_flags: Option<String>,
}

/// What the validator reports for a record set.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    #[serde(default)]
    pub cleaned_records: usize,
    #[serde(default)]
    pub errors: Vec<String>,
    /// Present when the fleet-availability business rule was evaluated.
    #[serde(default)]
    pub fleet_availability: Option<bool>,
}

#[async_trait]
pub trait RecordValidator: Send + Sync {
    /// Structural validation of a record set.
    async fn validate_records(&self, records: &[TrainRecord]) -> Result<ValidationReport>;

    /// Whether the fleet satisfies the minimum-availability business rule.
    async fn fleet_availability_ok(&self, records: &[TrainRecord]) -> Result<bool>;
}

/// A generated fleet status snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct FleetStatus {
    pub records: Vec<serde_json::Value>,
    /// How many generated units the domain logic judges service-capable.
    #[serde(default)]
    pub service_capable: usize,
}

#[async_trait]
pub trait FleetDataGenerator: Send + Sync {
    /// Fleet size the generator is configured for.
    fn fleet_size(&self) -> usize;

    async fn current_status(&self) -> Result<FleetStatus>;

    /// Number of historical performance records available.
    async fn historical_volume(&self) -> Result<usize>;

    /// The fully composed dataset with every section.
    async fn complete_dataset(&self) -> Result<serde_json::Value>;
}

/// Single-unit prediction. Every field is optional so a probe can report
/// precisely which part of the contract the backend missed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Prediction {
    pub delay_risk: Option<f64>,
    pub confidence: Option<f64>,
    pub risk_factors: Option<Vec<String>>,
    pub maintenance_urgency: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchPrediction {
    pub individual_predictions: Option<serde_json::Value>,
    pub aggregate_metrics: Option<serde_json::Value>,
}

#[async_trait]
pub trait DelayPredictor: Send + Sync {
    /// Whether the backend reports its models as loaded.
    async fn load_models(&self) -> Result<bool>;

    async fn predict_train(&self, train: &TrainRecord) -> Result<Prediction>;

    async fn predict_fleet(&self, trains: &[TrainRecord]) -> Result<BatchPrediction>;
}
