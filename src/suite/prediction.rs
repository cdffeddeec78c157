use crate::fixtures;
use crate::ports::DelayPredictor;
use crate::probe::Recorder;
use crate::report::CategoryResult;

pub async fn run(predictor: &dyn DelayPredictor) -> CategoryResult {
    let mut rec = Recorder::new();

    match predictor.load_models().await {
        Ok(loaded) => rec.record("ML models loaded", loaded),
        Err(err) => rec.fail_with_warning("ML models loaded", format!("predictor: {err:#}")),
    }

    let sample = fixtures::train("TRN-001");
    match predictor.predict_train(&sample).await {
        Ok(prediction) => {
            rec.record(
                "Individual prediction generated",
                prediction.delay_risk.is_some(),
            );
            rec.record("Prediction has confidence", prediction.confidence.is_some());
            rec.record(
                "Risk factors identified",
                prediction.risk_factors.is_some(),
            );
            if let Some(risk) = prediction.delay_risk {
                rec.record("Delay risk in valid range", (0.0..=1.0).contains(&risk));
            }
            if let Some(urgency) = prediction.maintenance_urgency {
                rec.record(
                    "Maintenance urgency in valid range",
                    (0.0..=100.0).contains(&urgency),
                );
            }
        }
        Err(err) => {
            rec.fail_with_warning(
                "Individual prediction generated",
                format!("predictor: {err:#}"),
            );
        }
    }

    let batch: Vec<_> = (0..5).map(|_| sample.clone()).collect();
    match predictor.predict_fleet(&batch).await {
        Ok(result) => {
            rec.record(
                "Batch predictions generated",
                result.individual_predictions.is_some(),
            );
            rec.record(
                "Aggregate metrics computed",
                result.aggregate_metrics.is_some(),
            );
        }
        Err(err) => {
            rec.fail_with_warning("Batch predictions generated", format!("predictor: {err:#}"));
            rec.record("Aggregate metrics computed", false);
        }
    }

    rec.finish()
}
