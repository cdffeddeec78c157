use crate::config::Config;
use crate::fixtures;
use crate::ports::RecordValidator;
use crate::probe::Recorder;
use crate::report::CategoryResult;

/// Exercises the external validator: acceptance of well-formed records,
/// rejection of malformed ones, and the minimum-fleet-availability rule.
pub async fn run(validator: &dyn RecordValidator, config: &Config) -> CategoryResult {
    let mut rec = Recorder::new();

    let valid = fixtures::valid_records();
    match validator.validate_records(&valid).await {
        Ok(report) => {
            rec.record("Valid records accepted", report.valid);
            if report.valid {
                rec.record(
                    "Record count preserved",
                    report.cleaned_records == valid.len(),
                );
            }
        }
        Err(err) => {
            rec.fail_with_warning("Valid records accepted", format!("validator: {err:#}"));
        }
    }

    match validator.validate_records(&fixtures::invalid_records()).await {
        Ok(report) => {
            rec.record("Malformed records rejected", !report.valid);
            rec.record("Validation errors reported", !report.errors.is_empty());
        }
        Err(err) => {
            rec.fail_with_warning("Malformed records rejected", format!("validator: {err:#}"));
            rec.record("Validation errors reported", false);
        }
    }

    // a fleet with zero service-capable units must fail the availability rule
    let unavailable = fixtures::unavailable_fleet(config.fleet_size);
    match validator.fleet_availability_ok(&unavailable).await {
        Ok(available) => rec.record("Fleet availability rule enforced", !available),
        Err(err) => {
            rec.fail_with_warning(
                "Fleet availability rule enforced",
                format!("validator: {err:#}"),
            );
        }
    }

    rec.finish()
}
