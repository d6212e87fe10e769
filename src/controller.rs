//! Inference form controller.
//!
//! One submission = one record = one synchronous pass through the model (or
//! the fallback heuristic). Nothing here panics or propagates: every path
//! ends in an [`Outcome`].

use serde::Serialize;
use tracing::{debug, error};

use crate::domain::{Label, PatientRecord, Row, EXPECTED_SCHEMA};
use crate::error::InferenceError;
use crate::ml::cache::{LoadOutcome, ModelCache, SharedModel};
use crate::ml::classifier::Classifier;
use crate::ml::heuristic::{fallback_heuristic, FallbackAssessment};
use crate::ml::schema::{ColumnKind, ColumnSpec};

/// Model answer for one record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub label: Label,
    /// `[p_low, p_high]`
    pub probabilities: [f64; 2],
}

/// What went wrong when the model rejected a row, with enough context to
/// diagnose a schema mismatch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InferenceFailure {
    pub message: String,
    /// Column dtypes of the row that was sent.
    pub dtypes: Vec<(String, &'static str)>,
    /// Column types the model expects.
    pub expected_schema: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Ok(Prediction),
    ModelUnavailable(FallbackAssessment),
    InferenceError(InferenceFailure),
}

/// Call predict and predict-probability on a single-row record.
pub fn predict(model: &dyn Classifier, record: &PatientRecord) -> Result<Prediction, InferenceError> {
    let row = record.to_row();
    let label = model.predict(&row)?;
    let probabilities = model.predict_proba(&row)?;

    if probabilities
        .iter()
        .any(|p| !p.is_finite() || !(0.0..=1.0).contains(p))
    {
        return Err(InferenceError::InvalidOutput(format!(
            "probabilities out of [0, 1]: {probabilities:?}"
        )));
    }

    Ok(Prediction {
        label,
        probabilities,
    })
}

pub struct InferenceController {
    model: Option<SharedModel>,
    notice: Option<String>,
}

impl InferenceController {
    pub fn new(outcome: &LoadOutcome) -> Self {
        Self {
            model: outcome.model(),
            notice: outcome.notice().map(str::to_string),
        }
    }

    /// Controller backed by a load-once cache; loads on first call.
    pub fn from_cache(cache: &ModelCache) -> Self {
        Self::new(cache.get_or_load())
    }

    pub fn with_model(model: SharedModel) -> Self {
        Self {
            model: Some(model),
            notice: None,
        }
    }

    pub fn without_model(notice: impl Into<String>) -> Self {
        Self {
            model: None,
            notice: Some(notice.into()),
        }
    }

    pub fn model(&self) -> Option<&SharedModel> {
        self.model.as_ref()
    }

    /// Why there is no model, if there is none.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Run one record through the model, or the heuristic when there is no model.
    pub fn assess(&self, record: &PatientRecord) -> Outcome {
        let Some(model) = &self.model else {
            let fallback = fallback_heuristic(record);
            debug!(score = fallback.score, level = %fallback.level, "fallback assessment");
            return Outcome::ModelUnavailable(fallback);
        };

        match predict(model.as_ref(), record) {
            Ok(prediction) => {
                debug!(
                    label = prediction.label.as_u8(),
                    p_high = prediction.probabilities[1],
                    "model assessment"
                );
                Outcome::Ok(prediction)
            }
            Err(e) => {
                error!(error = %e, "inference failed");
                Outcome::InferenceError(failure_report(model.as_ref(), &record.to_row(), &e))
            }
        }
    }
}

fn failure_report(model: &dyn Classifier, row: &Row, err: &InferenceError) -> InferenceFailure {
    let schema = model.expected_schema();
    let expected_schema = if schema.is_empty() {
        EXPECTED_SCHEMA
            .iter()
            .map(|(name, ty)| (name.to_string(), ty.to_string()))
            .collect()
    } else {
        schema.iter().map(describe_column).collect()
    };

    InferenceFailure {
        message: err.to_string(),
        dtypes: row.dtypes(),
        expected_schema,
    }
}

fn describe_column(spec: &ColumnSpec) -> (String, String) {
    let ty = match &spec.kind {
        ColumnKind::Numeric => "int/float".to_string(),
        ColumnKind::Categorical { categories } => {
            let quoted: Vec<String> = categories.iter().map(|c| format!("'{c}'")).collect();
            format!("str ({})", quoted.join(","))
        }
    };
    (spec.name.clone(), ty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RiskLevel, FIELD_NAMES};
    use crate::ml::artifact::tests::age_sex_artifact;
    use crate::ml::classifier::MockClassifier;
    use crate::ml::heart_schema;
    use std::sync::Arc;

    #[test]
    fn no_model_uses_heuristic() {
        let controller = InferenceController::without_model("demo");
        match controller.assess(&PatientRecord::default()) {
            Outcome::ModelUnavailable(fallback) => {
                assert!((fallback.score - 0.4).abs() < 1e-12);
                assert_eq!(fallback.level, RiskLevel::Medium);
            }
            other => panic!("expected fallback, got {other:?}"),
        }
        assert_eq!(controller.notice(), Some("demo"));
    }

    #[test]
    fn model_prediction_passes_through() {
        let mut mock = MockClassifier::new();
        mock.expect_predict().times(1).returning(|_| Ok(Label::HighRisk));
        mock.expect_predict_proba()
            .times(1)
            .returning(|_| Ok([0.3, 0.7]));

        let controller = InferenceController::with_model(Arc::new(mock));
        assert_eq!(
            controller.assess(&PatientRecord::default()),
            Outcome::Ok(Prediction {
                label: Label::HighRisk,
                probabilities: [0.3, 0.7],
            })
        );
    }

    #[test]
    fn model_sees_all_eleven_columns() {
        let mut mock = MockClassifier::new();
        mock.expect_predict()
            .withf(|row| row.names() == FIELD_NAMES.to_vec())
            .returning(|_| Ok(Label::LowRisk));
        mock.expect_predict_proba()
            .returning(|_| Ok([0.85, 0.15]));

        assert!(predict(&mock, &PatientRecord::default()).is_ok());
    }

    #[test]
    fn inference_error_is_reported_not_raised() {
        let mut mock = MockClassifier::new();
        mock.expect_predict().returning(|_| {
            Err(InferenceError::UnknownCategory {
                column: "Sex".into(),
                value: "M".into(),
            })
        });
        mock.expect_predict_proba().never();
        mock.expect_expected_schema().returning(heart_schema);

        let controller = InferenceController::with_model(Arc::new(mock));
        let Outcome::InferenceError(failure) = controller.assess(&PatientRecord::default()) else {
            panic!("expected inference error");
        };
        assert!(failure.message.contains("unknown category"));
        assert_eq!(failure.dtypes.len(), 11);
        assert_eq!(failure.dtypes[0], ("Age".to_string(), "int64"));
        assert_eq!(
            failure.expected_schema[1],
            ("Sex".to_string(), "str ('M','F')".to_string())
        );
    }

    #[test]
    fn falls_back_to_static_schema_listing() {
        let mut mock = MockClassifier::new();
        mock.expect_predict()
            .returning(|_| Err(InferenceError::Backend("boom".into())));
        mock.expect_expected_schema().returning(Vec::new);

        let controller = InferenceController::with_model(Arc::new(mock));
        let Outcome::InferenceError(failure) = controller.assess(&PatientRecord::default()) else {
            panic!("expected inference error");
        };
        assert_eq!(failure.expected_schema[9], ("Oldpeak".to_string(), "float".to_string()));
    }

    #[test]
    fn out_of_range_probabilities_are_rejected() {
        let mut mock = MockClassifier::new();
        mock.expect_predict().returning(|_| Ok(Label::HighRisk));
        mock.expect_predict_proba().returning(|_| Ok([-0.2, 1.2]));
        assert!(matches!(
            predict(&mock, &PatientRecord::default()),
            Err(InferenceError::InvalidOutput(_))
        ));
    }

    #[test]
    fn real_artifact_end_to_end() {
        let controller = InferenceController::with_model(Arc::new(age_sex_artifact()));
        let record = PatientRecord {
            age: 80,
            ..PatientRecord::default()
        };
        let Outcome::Ok(prediction) = controller.assess(&record) else {
            panic!("expected prediction");
        };
        assert_eq!(prediction.label, Label::HighRisk);
        assert!(prediction.probabilities[1] > 0.5);
    }

    #[test]
    fn outcome_json_is_tagged() {
        let json = serde_json::to_value(Outcome::Ok(Prediction {
            label: Label::LowRisk,
            probabilities: [0.85, 0.15],
        }))
        .unwrap();
        assert_eq!(json["kind"], "ok");
        assert_eq!(json["label"], 0);
    }
}
