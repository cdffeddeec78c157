//! HTTP-backed adapters for the collaborator ports. Each one speaks to the
//! backend under the versioned API base through the run's shared client.

use crate::ports::{
    BatchPrediction, DelayPredictor, FleetDataGenerator, FleetStatus, Prediction,
    RecordValidator, TrainRecord, ValidationReport,
};
use crate::probe::ProbeContext;
use anyhow::{Context, Result, ensure};
use async_trait::async_trait;
use serde_json::{Value, json};

/// Validator reached over `POST {api}/data/validate`. The endpoint reports
/// structural validity for any record set; a 422 is a legitimate "rejected"
/// reply, not a transport failure.
pub struct HttpValidator {
    client: reqwest::Client,
    api_base: String,
}

impl HttpValidator {
    pub fn new(cx: &ProbeContext) -> Self {
        Self {
            client: cx.client.clone(),
            api_base: cx.api_base.clone(),
        }
    }

    async fn submit(&self, records: &[TrainRecord]) -> Result<ValidationReport> {
        let url = format!("{}/data/validate", self.api_base);
        let response = self
            .client
            .post(&url)
            .json(&json!({ "records": records }))
            .send()
            .await
            .with_context(|| format!("POST {url}"))?;

        let status = response.status();
        ensure!(
            status.is_success() || status.as_u16() == 422,
            "validator returned status {status}"
        );
        response
            .json::<ValidationReport>()
            .await
            .context("decoding validation report")
    }
}

#[async_trait]
impl RecordValidator for HttpValidator {
    async fn validate_records(&self, records: &[TrainRecord]) -> Result<ValidationReport> {
        self.submit(records).await
    }

    async fn fleet_availability_ok(&self, records: &[TrainRecord]) -> Result<bool> {
        let report = self.submit(records).await?;
        Ok(report.fleet_availability.unwrap_or(report.valid))
    }
}

/// Generator reached under `GET {api}/data/generate/...`.
pub struct HttpGenerator {
    client: reqwest::Client,
    api_base: String,
    fleet_size: usize,
}

impl HttpGenerator {
    pub fn new(cx: &ProbeContext, fleet_size: usize) -> Self {
        Self {
            client: cx.client.clone(),
            api_base: cx.api_base.clone(),
            fleet_size,
        }
    }

    async fn fetch(&self, path: &str) -> Result<Value> {
        let url = format!("{}{path}", self.api_base);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;
        ensure!(
            response.status().is_success(),
            "generator returned status {} for {path}",
            response.status()
        );
        response
            .json::<Value>()
            .await
            .with_context(|| format!("decoding generator response for {path}"))
    }
}

#[async_trait]
impl FleetDataGenerator for HttpGenerator {
    fn fleet_size(&self) -> usize {
        self.fleet_size
    }

    async fn current_status(&self) -> Result<FleetStatus> {
        let body = self.fetch("/data/generate/status").await?;
        serde_json::from_value(body).context("decoding fleet status")
    }

    async fn historical_volume(&self) -> Result<usize> {
        let body = self.fetch("/data/generate/history").await?;
        // either a bare array of records or an object carrying a count
        if let Some(records) = body.as_array() {
            return Ok(records.len());
        }
        body.get("records")
            .and_then(|v| v.as_u64())
            .map(|n| n as usize)
            .context("history response carries neither an array nor a 'records' count")
    }

    async fn complete_dataset(&self) -> Result<Value> {
        self.fetch("/data/generate/dataset").await
    }
}

/// Predictor reached over `POST {api}/predict`; model readiness comes from
/// the health endpoint's `ml_models` component field.
pub struct HttpPredictor {
    client: reqwest::Client,
    api_base: String,
}

impl HttpPredictor {
    pub fn new(cx: &ProbeContext) -> Self {
        Self {
            client: cx.client.clone(),
            api_base: cx.api_base.clone(),
        }
    }

    async fn predict(&self, trains: &[TrainRecord]) -> Result<Value> {
        let url = format!("{}/predict", self.api_base);
        let response = self
            .client
            .post(&url)
            .json(&json!({ "trains": trains }))
            .send()
            .await
            .with_context(|| format!("POST {url}"))?;
        ensure!(
            response.status().is_success(),
            "predictor returned status {}",
            response.status()
        );
        response
            .json::<Value>()
            .await
            .context("decoding prediction response")
    }
}

#[async_trait]
impl DelayPredictor for HttpPredictor {
    async fn load_models(&self) -> Result<bool> {
        let url = format!("{}/health", self.api_base);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;
        ensure!(
            response.status().is_success(),
            "health endpoint returned status {}",
            response.status()
        );
        let health: Value = response.json().await.context("decoding health response")?;
        Ok(health.get("ml_models").and_then(|v| v.as_str()) == Some("ready"))
    }

    async fn predict_train(&self, train: &TrainRecord) -> Result<Prediction> {
        let body = self.predict(std::slice::from_ref(train)).await?;
        // single-train replies may still arrive in batch shape
        let prediction = body
            .get("individual_predictions")
            .and_then(|p| p.as_array())
            .and_then(|p| p.first())
            .cloned()
            .unwrap_or(body);
        serde_json::from_value(prediction).context("decoding individual prediction")
    }

    async fn predict_fleet(&self, trains: &[TrainRecord]) -> Result<BatchPrediction> {
        let body = self.predict(trains).await?;
        serde_json::from_value(body).context("decoding batch prediction")
    }
}
