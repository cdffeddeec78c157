use crate::config::Config;
use crate::probe::{Expect, Method, ProbeContext, Recorder};
use crate::report::CategoryResult;

const REQUIRED_DIRS: &[&str] = &["data", "backend", "frontend", "deployment"];

/// Reachability of the service plus the deployed tree's basic shape. Runs
/// first: later categories assume the backend answers at all.
pub async fn run(cx: &ProbeContext, config: &Config) -> CategoryResult {
    let mut rec = Recorder::new();

    match cx.request(Method::GET, &cx.api_url("/health"), None).await {
        Ok(reply) if reply.status == 200 => match reply.json() {
            Ok(health) => {
                rec.record("Health endpoint accessible", true);
                // component fields are optional; probe them only when reported
                if let Some(database) = health.get("database") {
                    rec.record("Database connection", database.as_str() == Some("healthy"));
                }
                if let Some(ml_models) = health.get("ml_models") {
                    rec.record("ML models loaded", ml_models.as_str() == Some("ready"));
                }
            }
            Err(err) => {
                rec.fail_with_warning(
                    "Health endpoint accessible",
                    format!("health response is not valid JSON: {err}"),
                );
            }
        },
        Ok(_) => rec.record("Health endpoint accessible", false),
        Err(err) => {
            rec.fail_with_warning(
                "Health endpoint accessible",
                format!("Health endpoint accessible: {err}"),
            );
        }
    }

    cx.probe_endpoint(
        &mut rec,
        "Backend server responding",
        Method::GET,
        &cx.base_url,
        None,
        &Expect::OneOf(&[200, 404]),
    )
    .await;

    for dir in REQUIRED_DIRS {
        rec.record(format!("Directory '{dir}' exists"), cx.dir_exists(dir));
    }

    for file in &config.critical_files {
        rec.record(format!("File '{file}' exists"), cx.file_exists(file));
    }

    rec.finish()
}
