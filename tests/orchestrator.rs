mod common;

use common::{FakeGenerator, FakePredictor, FakeValidator, context_for, deployed_tree,
             optimize_response, test_config};
use fleetcheck::orchestrator::{CATEGORIES, Orchestrator, guard};
use fleetcheck::probe::Recorder;
use fleetcheck::report::CategoryResult;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn exploding_runner() -> CategoryResult {
    panic!("runner defect: index out of bounds")
}

#[tokio::test]
async fn guard_converts_a_panicking_runner_into_a_failing_result() {
    let result = guard("Exploding", exploding_runner()).await;
    assert!(!result.success);
    assert_eq!(result.total_tests, 1);
    assert_eq!(result.tests_passed, 0);
    assert_eq!(result.details.len(), result.total_tests);
    assert!(
        result
            .error
            .as_deref()
            .is_some_and(|e| e.contains("runner defect")),
        "error: {:?}",
        result.error
    );
}

#[tokio::test]
async fn guard_passes_a_normal_result_through() {
    let result = guard("Quiet", async {
        let mut rec = Recorder::new();
        rec.record("only probe", true);
        rec.finish()
    })
    .await;
    assert!(result.success);
    assert_eq!(result.total_tests, 1);
}

#[tokio::test]
async fn offline_backend_still_yields_all_ten_categories() {
    // nothing listens; every network probe fails, nothing crashes
    let root = tempfile::tempdir().unwrap();
    let config = test_config("http://127.0.0.1:1", root.path());
    let cx = context_for(&config);

    let report = Orchestrator::over_http(cx, config).run().await;

    let names: Vec<&str> = report
        .test_results
        .iter()
        .map(|(name, _)| name.as_str())
        .collect();
    assert_eq!(names, CATEGORIES);
    assert!(!report.overall_success);
    assert_eq!(
        report.total_tests,
        report
            .test_results
            .iter()
            .map(|(_, r)| r.total_tests)
            .sum::<usize>()
    );
    assert_eq!(
        report.total_passed,
        report
            .test_results
            .iter()
            .map(|(_, r)| r.tests_passed)
            .sum::<usize>()
    );
}

#[tokio::test]
async fn fully_conforming_backend_passes_every_category() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "database": "healthy",
            "ml_models": "ready",
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/optimizations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "individual_predictions": [],
            "aggregate_metrics": {},
        })))
        .mount(&server)
        .await;

    // malformed and infeasible optimize payloads get a structured 422;
    // everything else gets a valid full-fleet schedule
    Mock::given(method("POST"))
        .and(path("/api/v1/optimize"))
        .and(body_string("not valid json"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/optimize"))
        .and(body_json(json!({ "trains": [{ "train_id": "TRN-001" }] })))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/optimize"))
        .and(body_json(json!({
            "trains": [{ "train_id": "TRN-001", "jobcard_status": "CRITICAL_OPEN" }],
            "target_date": "2024-10-02",
            "constraints": { "min_service_trains": 5 },
        })))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/optimize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(optimize_response(25, 18)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/simulate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "assignments": [],
        })))
        .mount(&server)
        .await;

    let root = tempfile::tempdir().unwrap();
    deployed_tree(root.path());
    let config = test_config(&server.uri(), root.path());
    let cx = context_for(&config);

    let generator = FakeGenerator {
        fleet_size: config.fleet_size,
        retention_days: config.retention_days,
    };
    let orchestrator = Orchestrator::new(
        cx,
        config,
        Arc::new(FakeValidator),
        Arc::new(generator),
        Arc::new(FakePredictor),
    );
    let report = orchestrator.run().await;

    for (name, result) in &report.test_results {
        assert!(
            result.success,
            "{name} failed: {:?} warnings: {:?}",
            result.details, result.warnings
        );
    }
    assert!(report.overall_success);
    assert!((report.success_rate - 1.0).abs() < 1e-9);
}
