use crate::config::Config;
use crate::fixtures;
use crate::probe::{Method, ProbeContext, Recorder};
use crate::report::CategoryResult;
use futures::future::join_all;
use std::time::Instant;

/// Latency ceilings plus a fixed-size concurrent health batch. The batch is
/// jointly awaited; its success rate is computed only after every member has
/// completed or failed.
pub async fn run(cx: &ProbeContext, config: &Config) -> CategoryResult {
    let mut rec = Recorder::new();
    let health_url = cx.api_url("/health");

    let started = Instant::now();
    match cx.request(Method::GET, &health_url, None).await {
        Ok(reply) => {
            rec.record(
                "Health check response time",
                reply.status == 200 && started.elapsed() < config.health_latency_ceiling,
            );
        }
        Err(err) => {
            rec.fail_with_warning("Health check response time", format!("health: {err}"));
        }
    }

    let batch = (0..config.concurrent_probes).map(|_| async {
        matches!(
            cx.request(Method::GET, &health_url, None).await,
            Ok(reply) if reply.status == 200
        )
    });
    let outcomes = join_all(batch).await;
    let success_rate = if outcomes.is_empty() {
        0.0
    } else {
        outcomes.iter().filter(|ok| **ok).count() as f64 / outcomes.len() as f64
    };
    // tolerant of transient failures: the threshold is below 100%
    rec.record(
        "Concurrent request handling",
        success_rate >= config.concurrent_success_threshold,
    );

    let fleet = fixtures::fleet(config.fleet_size);
    let request = fixtures::optimize_request(&fleet, config.min_service_trains);
    let started = Instant::now();
    match cx
        .request(Method::POST, &cx.api_url("/optimize"), Some(&request))
        .await
    {
        Ok(reply) => {
            let elapsed = started.elapsed();
            rec.record("Large dataset processing", reply.status == 200);
            rec.record(
                "Large dataset performance",
                elapsed < config.large_optimize_latency_ceiling,
            );
        }
        Err(err) => {
            rec.fail_with_warning("Large dataset processing", format!("optimize: {err}"));
            rec.record("Large dataset performance", false);
        }
    }

    rec.finish()
}
