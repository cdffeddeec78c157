use crate::fixtures;
use crate::probe::{Expect, Method, ProbeContext, Recorder};
use crate::report::CategoryResult;
use serde_json::json;

/// What-if simulation needs an optimization id to modify. When the base call
/// fails, the simulation probe is recorded as failed with the missing
/// precondition named, and the simulate endpoint is never touched.
pub async fn run(cx: &ProbeContext) -> CategoryResult {
    let mut rec = Recorder::new();

    let base_request = fixtures::optimize_request(&[fixtures::train("TRN-001")], 1);
    let base_id = match cx
        .request(Method::POST, &cx.api_url("/optimize"), Some(&base_request))
        .await
    {
        Ok(reply) if reply.status == 200 => match reply.json() {
            Ok(result) => {
                rec.record("Base optimization for simulation", true);
                result
                    .get("optimization_id")
                    .cloned()
                    .filter(|id| !id.is_null())
            }
            Err(err) => {
                rec.fail_with_warning(
                    "Base optimization for simulation",
                    format!("optimize response is not valid JSON: {err}"),
                );
                None
            }
        },
        Ok(reply) => {
            rec.fail_with_warning(
                "Base optimization for simulation",
                format!("optimize returned status {}", reply.status),
            );
            None
        }
        Err(err) => {
            rec.fail_with_warning(
                "Base optimization for simulation",
                format!("could not reach optimize endpoint: {err}"),
            );
            None
        }
    };

    match base_id {
        Some(id) => {
            let simulation = json!({
                "base_optimization_id": id,
                "modifications": { "force_maintenance": ["TRN-001"] },
            });
            if let Some(reply) = cx
                .probe_endpoint(
                    &mut rec,
                    "What-if simulation API",
                    Method::POST,
                    &cx.api_url("/simulate"),
                    Some(&simulation),
                    &Expect::OneOf(&[200, 404]),
                )
                .await
                && reply.status == 200
            {
                let has_assignments = reply
                    .json()
                    .is_ok_and(|result| result.get("assignments").is_some());
                rec.record("Simulation result structure", has_assignments);
            }
        }
        None => {
            rec.fail_with_warning(
                "What-if simulation API",
                "simulation not attempted: no base optimization id available",
            );
        }
    }

    rec.finish()
}
