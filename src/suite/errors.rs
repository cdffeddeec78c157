use crate::fixtures;
use crate::probe::{Expect, Method, ProbeContext, Recorder};
use crate::report::CategoryResult;
use serde_json::json;

/// Malformed and hostile requests must surface as defined 4xx replies, never
/// as an undefined server fault.
pub async fn run(cx: &ProbeContext) -> CategoryResult {
    let mut rec = Recorder::new();
    let optimize_url = cx.api_url("/optimize");

    match cx.post_raw(&optimize_url, "not valid json").await {
        Ok(reply) => {
            rec.record(
                "Invalid JSON payload rejected",
                matches!(reply.status, 400 | 422),
            );
        }
        Err(err) => {
            rec.fail_with_warning("Invalid JSON payload rejected", format!("optimize: {err}"));
        }
    }

    let incomplete = json!({ "trains": [{ "train_id": "TRN-001" }] });
    cx.probe_endpoint(
        &mut rec,
        "Missing required fields rejected",
        Method::POST,
        &optimize_url,
        Some(&incomplete),
        &Expect::OneOf(&[400, 422]),
    )
    .await;

    cx.probe_endpoint(
        &mut rec,
        "Unknown endpoint returns 404",
        Method::GET,
        &cx.api_url("/nonexistent"),
        None,
        &Expect::Status(404),
    )
    .await;

    // an infeasible request gets exactly one defined answer: a structured 422
    let impossible = json!({
        "trains": [{
            "train_id": "TRN-001",
            "jobcard_status": "CRITICAL_OPEN",
        }],
        "target_date": fixtures::TARGET_DATE,
        "constraints": { "min_service_trains": 5 },
    });
    cx.probe_endpoint(
        &mut rec,
        "Infeasible constraints rejected",
        Method::POST,
        &optimize_url,
        Some(&impossible),
        &Expect::Status(422),
    )
    .await;

    rec.finish()
}
