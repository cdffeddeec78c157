use crate::probe::{Expect, Method, ProbeContext, Recorder};
use crate::report::CategoryResult;
use serde_json::json;

/// Probes the declarative endpoint table: method, path, optional body, and
/// the accepted status set.
pub async fn run(cx: &ProbeContext) -> CategoryResult {
    let mut rec = Recorder::new();

    let endpoints = [
        (Method::GET, "/health", None, Expect::Status(200)),
        (Method::GET, "/optimizations", None, Expect::Status(200)),
        // an empty payload may validate cleanly or be rejected; both are contract
        (
            Method::POST,
            "/predict",
            Some(json!({ "trains": [] })),
            Expect::OneOf(&[200, 422]),
        ),
    ];

    for (method, path, body, expect) in endpoints {
        let description = format!("{method} {path}");
        cx.probe_endpoint(
            &mut rec,
            &description,
            method,
            &cx.api_url(path),
            body.as_ref(),
            &expect,
        )
        .await;
    }

    rec.finish()
}
