//! Request fixtures the categories submit to the backend. These encode the
//! suite's expectations about well-formed and deliberately malformed fleet
//! data; they are inputs to the system under test, not test doubles.

use crate::ports::TrainRecord;
use serde_json::{Value, json};

/// Target date used by every scheduling request in the suite.
pub const TARGET_DATE: &str = "2024-10-02";

/// A healthy, service-capable unit.
pub fn train(id: &str) -> TrainRecord {
    TrainRecord {
        train_id: id.to_string(),
        last_service_date: "2024-09-01".to_string(),
        fitness_cert_valid_from: Some("2024-08-01".to_string()),
        fitness_cert_valid_to: "2024-12-01".to_string(),
        jobcard_status: "NONE".to_string(),
        mileage_since_overhaul: 45_000,
        crew_available: true,
        branding_exposure_hours: Some(0),
        iot_sensor_flags: Some("NORMAL".to_string()),
    }
}

/// A full-size fleet with realistic variation: every tenth unit has an open
/// job card and mileage spreads across the fleet.
pub fn fleet(size: usize) -> Vec<TrainRecord> {
    (1..=size)
        .map(|i| {
            let mut unit = train(&format!("TRN-{i:03}"));
            if i % 10 == 0 {
                unit.jobcard_status = "OPEN".to_string();
            }
            unit.mileage_since_overhaul = 40_000 + i as i64 * 1_000;
            unit
        })
        .collect()
}

/// Two well-formed records the validator must accept.
pub fn valid_records() -> Vec<TrainRecord> {
    let mut second = train("TRN-002");
    second.last_service_date = "2024-09-15".to_string();
    second.fitness_cert_valid_from = Some("2024-08-15".to_string());
    second.fitness_cert_valid_to = "2024-11-15".to_string();
    second.jobcard_status = "OPEN".to_string();
    second.mileage_since_overhaul = 52_000;
    vec![train("TRN-001"), second]
}

/// Records the validator must reject: an unparseable date, an expired
/// certificate, and negative mileage.
pub fn invalid_records() -> Vec<TrainRecord> {
    let mut bad_date = train("TRN-901");
    bad_date.last_service_date = "invalid-date".to_string();
    bad_date.jobcard_status = "CRITICAL_OPEN".to_string();
    bad_date.mileage_since_overhaul = -1_000;

    let mut expired = train("TRN-902");
    expired.fitness_cert_valid_to = "2024-01-01".to_string();
    expired.mileage_since_overhaul = 200_000;

    vec![bad_date, expired]
}

/// A fleet where no unit is service-capable, for the minimum-availability rule.
pub fn unavailable_fleet(size: usize) -> Vec<TrainRecord> {
    (1..=size)
        .map(|i| {
            let mut unit = train(&format!("TRN-{i:03}"));
            unit.fitness_cert_valid_to = "2023-01-01".to_string();
            unit.jobcard_status = "CRITICAL_OPEN".to_string();
            unit.mileage_since_overhaul = 50_000;
            unit
        })
        .collect()
}

/// A complete scheduling request with explicit depot constraints.
pub fn optimize_request(trains: &[TrainRecord], min_service_trains: usize) -> Value {
    json!({
        "trains": trains,
        "target_date": TARGET_DATE,
        "constraints": {
            "min_service_trains": min_service_trains,
            "maintenance_bays": 4,
            "cleaning_bays": 3,
            "available_crews": 22,
        },
    })
}
