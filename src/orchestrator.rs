use crate::adapters::{HttpGenerator, HttpPredictor, HttpValidator};
use crate::config::Config;
use crate::ports::{DelayPredictor, FleetDataGenerator, RecordValidator};
use crate::probe::ProbeContext;
use crate::report::{CategoryResult, RunReport};
use crate::suite;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinError;
use tracing::{error, info};

/// Category names in execution order. Health runs first because later
/// categories assume the backend is reachable at all.
pub const CATEGORIES: [&str; 10] = [
    "System Health Check",
    "Data Validation",
    "Synthetic Data Generation",
    "ML Prediction Engine",
    "Optimization Algorithm",
    "API Endpoints",
    "What-If Simulation",
    "Performance & Load",
    "Error Handling",
    "Frontend Integration",
];

/// Drives the ten category runners sequentially and folds their results into
/// one report. Owns the shared probe context for the run's lifetime.
pub struct Orchestrator {
    cx: Arc<ProbeContext>,
    config: Arc<Config>,
    validator: Arc<dyn RecordValidator>,
    generator: Arc<dyn FleetDataGenerator>,
    predictor: Arc<dyn DelayPredictor>,
}

impl Orchestrator {
    pub fn new(
        cx: ProbeContext,
        config: Config,
        validator: Arc<dyn RecordValidator>,
        generator: Arc<dyn FleetDataGenerator>,
        predictor: Arc<dyn DelayPredictor>,
    ) -> Self {
        Self {
            cx: Arc::new(cx),
            config: Arc::new(config),
            validator,
            generator,
            predictor,
        }
    }

    /// Production wiring: every collaborator port speaks HTTP to the backend
    /// through the shared client.
    pub fn over_http(cx: ProbeContext, config: Config) -> Self {
        let validator = Arc::new(HttpValidator::new(&cx));
        let generator = Arc::new(HttpGenerator::new(&cx, config.fleet_size));
        let predictor = Arc::new(HttpPredictor::new(&cx));
        Self::new(cx, config, validator, generator, predictor)
    }

    pub async fn run(&self) -> RunReport {
        let mut results = Vec::with_capacity(CATEGORIES.len());

        {
            let cx = Arc::clone(&self.cx);
            let config = Arc::clone(&self.config);
            results.push(
                self.execute(CATEGORIES[0], async move {
                    suite::health::run(&cx, &config).await
                })
                .await,
            );
        }
        {
            let validator = Arc::clone(&self.validator);
            let config = Arc::clone(&self.config);
            results.push(
                self.execute(CATEGORIES[1], async move {
                    suite::validation::run(validator.as_ref(), &config).await
                })
                .await,
            );
        }
        {
            let generator = Arc::clone(&self.generator);
            let config = Arc::clone(&self.config);
            results.push(
                self.execute(CATEGORIES[2], async move {
                    suite::synthetic::run(generator.as_ref(), &config).await
                })
                .await,
            );
        }
        {
            let predictor = Arc::clone(&self.predictor);
            results.push(
                self.execute(CATEGORIES[3], async move {
                    suite::prediction::run(predictor.as_ref()).await
                })
                .await,
            );
        }
        {
            let cx = Arc::clone(&self.cx);
            let config = Arc::clone(&self.config);
            results.push(
                self.execute(CATEGORIES[4], async move {
                    suite::optimization::run(&cx, &config).await
                })
                .await,
            );
        }
        {
            let cx = Arc::clone(&self.cx);
            results.push(
                self.execute(CATEGORIES[5], async move { suite::api::run(&cx).await })
                    .await,
            );
        }
        {
            let cx = Arc::clone(&self.cx);
            results.push(
                self.execute(CATEGORIES[6], async move { suite::simulation::run(&cx).await })
                    .await,
            );
        }
        {
            let cx = Arc::clone(&self.cx);
            let config = Arc::clone(&self.config);
            results.push(
                self.execute(CATEGORIES[7], async move {
                    suite::performance::run(&cx, &config).await
                })
                .await,
            );
        }
        {
            let cx = Arc::clone(&self.cx);
            results.push(
                self.execute(CATEGORIES[8], async move { suite::errors::run(&cx).await })
                    .await,
            );
        }
        {
            let cx = Arc::clone(&self.cx);
            results.push(
                self.execute(CATEGORIES[9], async move { suite::frontend::run(&cx).await })
                    .await,
            );
        }

        RunReport::from_categories(results)
    }

    async fn execute(
        &self,
        name: &str,
        runner: impl Future<Output = CategoryResult> + Send + 'static,
    ) -> (String, CategoryResult) {
        info!(category = name, "category started");
        let started = Instant::now();
        let result = guard(name, runner).await;
        let verdict = if result.success { "PASS" } else { "FAIL" };
        info!(
            category = name,
            result = verdict,
            passed = result.tests_passed,
            total = result.total_tests,
            warnings = result.warnings.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "category completed"
        );
        (name.to_string(), result)
    }
}

/// Failure boundary around one category runner: a panic inside the runner is
/// a defect in the suite, not in the system under test, and becomes a
/// synthetic one-test failure so the remaining categories still run.
pub async fn guard(
    name: &str,
    runner: impl Future<Output = CategoryResult> + Send + 'static,
) -> CategoryResult {
    match tokio::spawn(runner).await {
        Ok(result) => result,
        Err(err) => {
            let message = panic_message(err);
            error!(category = name, message = %message, "category runner crashed");
            CategoryResult::defect(message)
        }
    }
}

fn panic_message(err: JoinError) -> String {
    match err.try_into_panic() {
        Ok(payload) => {
            if let Some(message) = payload.downcast_ref::<&str>() {
                (*message).to_string()
            } else if let Some(message) = payload.downcast_ref::<String>() {
                message.clone()
            } else {
                "category runner panicked".to_string()
            }
        }
        Err(err) => format!("category task failed: {err}"),
    }
}
