use crate::config::Config;
use crate::ports::FleetDataGenerator;
use crate::probe::Recorder;
use crate::report::CategoryResult;

const REQUIRED_FIELDS: &[&str] = &[
    "train_id",
    "last_service_date",
    "fitness_cert_valid_to",
    "jobcard_status",
    "mileage_since_overhaul",
];

const DATASET_SECTIONS: &[&str] = &[
    "trains",
    "historical_performance",
    "job_cards",
    "iot_sensors",
    "branding_contracts",
    "metadata",
];

/// Historical volume may drift from `fleet_size * retention_days` by this
/// many records before the probe fails.
const HISTORY_TOLERANCE: usize = 100;

pub async fn run(generator: &dyn FleetDataGenerator, config: &Config) -> CategoryResult {
    let mut rec = Recorder::new();

    rec.record(
        "Generator configured for fleet size",
        generator.fleet_size() == config.fleet_size,
    );

    match generator.current_status().await {
        Ok(status) => {
            rec.record(
                "Fleet status generated",
                status.records.len() == config.fleet_size,
            );
            if let Some(sample) = status.records.first() {
                let has_all = REQUIRED_FIELDS.iter().all(|f| sample.get(f).is_some());
                rec.record("Status records carry required fields", has_all);
                rec.record(
                    "Minimum service capacity met",
                    status.service_capable >= config.min_service_trains,
                );
            }
        }
        Err(err) => {
            rec.fail_with_warning("Fleet status generated", format!("generator: {err:#}"));
        }
    }

    match generator.historical_volume().await {
        Ok(volume) => {
            rec.record("Historical data generated", volume > 0);
            let expected = config.fleet_size * config.retention_days;
            rec.record(
                "Historical volume within tolerance",
                volume.abs_diff(expected) < HISTORY_TOLERANCE,
            );
        }
        Err(err) => {
            rec.fail_with_warning("Historical data generated", format!("generator: {err:#}"));
        }
    }

    match generator.complete_dataset().await {
        Ok(dataset) => {
            let has_sections = DATASET_SECTIONS.iter().all(|s| dataset.get(s).is_some());
            rec.record("Complete dataset structure", has_sections);
        }
        Err(err) => {
            rec.fail_with_warning("Complete dataset structure", format!("generator: {err:#}"));
        }
    }

    rec.finish()
}
