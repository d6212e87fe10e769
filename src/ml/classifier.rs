//! The model capability: predict and predict-probability over one row.

use crate::domain::{Label, Row};
use crate::error::InferenceError;
use crate::ml::schema::ColumnSpec;

/// A pre-trained binary classifier.
///
/// Loaded once, shared read-only across every request.
#[cfg_attr(test, mockall::automock)]
pub trait Classifier: Send + Sync {
    /// Short model type name for display (e.g. `dense`, `onnx`).
    fn kind(&self) -> &'static str;

    /// Columns the model expects, in order.
    fn expected_schema(&self) -> Vec<ColumnSpec>;

    /// Free-form artifact metadata (training info, reported accuracy, ...).
    fn metadata(&self) -> Option<serde_json::Value>;

    /// Class probabilities `[p_low, p_high]` for a single row.
    fn predict_proba(&self, row: &Row) -> Result<[f64; 2], InferenceError>;

    /// Predicted label for a single row.
    fn predict(&self, row: &Row) -> Result<Label, InferenceError> {
        let proba = self.predict_proba(row)?;
        Ok(Label::from_probability(proba[1], 0.5))
    }
}

/// Turn raw model outputs into a checked `[p_low, p_high]` pair.
///
/// One output is read as the positive-class probability; two outputs as both
/// class probabilities, which must sum to one.
pub fn probabilities_from_output(output: &[f64]) -> Result<[f64; 2], InferenceError> {
    let proba = match output {
        [p_high] => [1.0 - p_high, *p_high],
        [p_low, p_high] => [*p_low, *p_high],
        other => {
            return Err(InferenceError::InvalidOutput(format!(
                "expected 1 or 2 outputs, got {}",
                other.len()
            )))
        }
    };

    if proba.iter().any(|p| !p.is_finite() || !(0.0..=1.0).contains(p)) {
        return Err(InferenceError::InvalidOutput(format!(
            "probabilities out of [0, 1]: {proba:?}"
        )));
    }
    if (proba[0] + proba[1] - 1.0).abs() > 1e-6 {
        return Err(InferenceError::InvalidOutput(format!(
            "probabilities do not sum to 1: {proba:?}"
        )));
    }
    Ok(proba)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_output_is_positive_class() {
        let proba = probabilities_from_output(&[0.7]).unwrap();
        assert!((proba[0] - 0.3).abs() < 1e-12);
        assert_eq!(proba[1], 0.7);
    }

    #[test]
    fn rejects_unnormalized_pairs() {
        assert!(probabilities_from_output(&[0.7, 0.7]).is_err());
        assert!(probabilities_from_output(&[f64::NAN]).is_err());
        assert!(probabilities_from_output(&[1.5]).is_err());
        assert!(probabilities_from_output(&[0.2, 0.3, 0.5]).is_err());
    }

    #[test]
    fn default_predict_thresholds_at_half() {
        struct Fixed([f64; 2]);
        impl Classifier for Fixed {
            fn kind(&self) -> &'static str {
                "fixed"
            }
            fn expected_schema(&self) -> Vec<ColumnSpec> {
                Vec::new()
            }
            fn metadata(&self) -> Option<serde_json::Value> {
                None
            }
            fn predict_proba(&self, _row: &Row) -> Result<[f64; 2], InferenceError> {
                Ok(self.0)
            }
        }

        assert_eq!(Fixed([0.4, 0.6]).predict(&Row::new()), Ok(Label::HighRisk));
        assert_eq!(Fixed([0.85, 0.15]).predict(&Row::new()), Ok(Label::LowRisk));
    }
}
