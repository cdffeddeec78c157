use crate::config::Config;
use crate::fixtures;
use crate::probe::{Method, ProbeContext, Recorder};
use crate::report::CategoryResult;
use std::collections::HashSet;
use std::time::Instant;

/// The closed set of assignments the scheduler may hand out.
pub const VALID_ASSIGNMENTS: &[&str] = &["SERVICE", "STANDBY", "MAINTENANCE"];

/// Submits a full-size scheduling request and validates the response schema,
/// the assignment constraints, and the wall-clock latency.
pub async fn run(cx: &ProbeContext, config: &Config) -> CategoryResult {
    let mut rec = Recorder::new();

    let fleet = fixtures::fleet(config.fleet_size);
    let request = fixtures::optimize_request(&fleet, config.min_service_trains);

    let started = Instant::now();
    match cx
        .request(Method::POST, &cx.api_url("/optimize"), Some(&request))
        .await
    {
        Ok(reply) if reply.status == 200 => {
            let elapsed = started.elapsed();
            rec.record("Optimization API accessible", true);

            match reply.json() {
                Ok(result) => {
                    let has_structure = ["optimization_id", "assignments", "objectives_achieved"]
                        .iter()
                        .all(|field| result.get(field).is_some());
                    rec.record("Optimization result structure", has_structure);

                    match result.get("assignments").and_then(|a| a.as_array()) {
                        Some(assignments) => {
                            let assigned_ids: HashSet<&str> = assignments
                                .iter()
                                .filter_map(|a| a.get("train_id").and_then(|v| v.as_str()))
                                .collect();
                            rec.record(
                                "Every train assigned exactly once",
                                assignments.len() == config.fleet_size
                                    && assigned_ids.len() == config.fleet_size,
                            );

                            let service_count = assignments
                                .iter()
                                .filter(|a| {
                                    a.get("assignment").and_then(|v| v.as_str())
                                        == Some("SERVICE")
                                })
                                .count();
                            rec.record(
                                "Minimum service constraint met",
                                service_count >= config.min_service_trains,
                            );

                            let all_valid = assignments.iter().all(|a| {
                                a.get("assignment")
                                    .and_then(|v| v.as_str())
                                    .is_some_and(|v| VALID_ASSIGNMENTS.contains(&v))
                            });
                            rec.record("All assignments valid", all_valid);
                        }
                        // the checks must not vanish when the section is malformed
                        None => {
                            rec.fail_with_warning(
                                "Every train assigned exactly once",
                                "assignments section is missing or not a list",
                            );
                            rec.record("Minimum service constraint met", false);
                            rec.record("All assignments valid", false);
                        }
                    }
                }
                Err(err) => {
                    rec.fail_with_warning(
                        "Optimization result structure",
                        format!("optimize response is not valid JSON: {err}"),
                    );
                }
            }

            rec.record(
                "Optimization completed quickly",
                elapsed < config.optimize_latency_ceiling,
            );
        }
        Ok(reply) => {
            rec.fail_with_warning(
                "Optimization API accessible",
                format!("optimize returned status {}", reply.status),
            );
        }
        Err(err) => {
            rec.fail_with_warning(
                "Optimization API accessible",
                format!("could not reach optimize endpoint: {err}"),
            );
        }
    }

    rec.finish()
}
