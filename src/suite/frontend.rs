use crate::probe::{ProbeContext, Recorder};
use crate::report::CategoryResult;

const ASSETS: &[&str] = &[
    "frontend/index.html",
    "frontend/js/dashboard.js",
    "frontend/css/style.css",
];

const HTML_MARKERS: &[&str] = &["<title>", "<body>", "dashboard.js", "style.css"];

const SCRIPT_FUNCTIONS: &[&str] = &["FleetDashboard", "runOptimization", "loadTrainData"];

/// Static-asset existence plus required markers inside the primary page and
/// its dashboard script.
pub async fn run(cx: &ProbeContext) -> CategoryResult {
    let mut rec = Recorder::new();

    for asset in ASSETS {
        rec.record(format!("Frontend file '{asset}' exists"), cx.file_exists(asset));
    }

    if cx.file_exists("frontend/index.html") {
        for marker in HTML_MARKERS {
            rec.record(
                format!("HTML contains {marker}"),
                cx.file_contains("frontend/index.html", marker),
            );
        }
    }

    if cx.file_exists("frontend/js/dashboard.js") {
        for function in SCRIPT_FUNCTIONS {
            rec.record(
                format!("Dashboard script defines {function}"),
                cx.file_contains("frontend/js/dashboard.js", function),
            );
        }
    }

    rec.finish()
}
