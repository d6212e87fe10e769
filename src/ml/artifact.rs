//! JSON model artifact: column preprocessing + dense network.
//!
//! ```json
//! {
//!   "columns": [{"name": "Age", "kind": "numeric"}, ...],
//!   "threshold": 0.5,
//!   "metadata": {"accuracy": 0.873},
//!   "network": {"input_dim": 20, "layers": [...]}
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::{Label, Row};
use crate::error::{CardioError, InferenceError, Result};
use crate::ml::classifier::{probabilities_from_output, Classifier};
use crate::ml::dense::DenseNetwork;
use crate::ml::schema::{self, ColumnSpec};

fn default_threshold() -> f64 {
    0.5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseArtifact {
    pub columns: Vec<ColumnSpec>,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default)]
    pub metadata: serde_json::Value,
    pub network: DenseNetwork,
}

impl DenseArtifact {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let artifact: Self = serde_json::from_str(content)?;
        artifact.validate().map_err(CardioError::Validation)?;
        Ok(artifact)
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        schema::validate_columns(&self.columns)?;
        self.network.validate()?;

        let width = schema::encoded_width(&self.columns);
        if width != self.network.input_dim {
            return Err(format!(
                "encoded column width {width} != network input_dim {}",
                self.network.input_dim
            ));
        }
        let out = self.network.output_dim();
        if out != 1 && out != 2 {
            return Err(format!("network output_dim must be 1 or 2, got {out}"));
        }
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(format!("threshold must be in (0, 1), got {}", self.threshold));
        }
        Ok(())
    }
}

impl Classifier for DenseArtifact {
    fn kind(&self) -> &'static str {
        "dense"
    }

    fn expected_schema(&self) -> Vec<ColumnSpec> {
        self.columns.clone()
    }

    fn metadata(&self) -> Option<serde_json::Value> {
        if self.metadata.is_null() {
            None
        } else {
            Some(self.metadata.clone())
        }
    }

    fn predict_proba(&self, row: &Row) -> std::result::Result<[f64; 2], InferenceError> {
        let features = schema::encode(&self.columns, row)?;
        let output = self.network.forward(&features)?;
        probabilities_from_output(&output)
    }

    fn predict(&self, row: &Row) -> std::result::Result<Label, InferenceError> {
        let proba = self.predict_proba(row)?;
        Ok(Label::from_probability(proba[1], self.threshold))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::{Cell, PatientRecord, Sex};
    use crate::ml::dense::{Activation, DenseLayer};

    /// Logistic model over the heart schema that only looks at Age and Sex=M.
    pub(crate) fn age_sex_artifact() -> DenseArtifact {
        let columns = schema::heart_schema();
        let mut weights = vec![0.0; schema::encoded_width(&columns)];
        weights[0] = 0.1; // Age
        weights[1] = 1.0; // Sex = M
        DenseArtifact {
            columns,
            threshold: 0.5,
            metadata: serde_json::json!({"accuracy": 0.873}),
            network: DenseNetwork {
                input_dim: weights.len(),
                input_mean: None,
                input_std: None,
                layers: vec![DenseLayer {
                    weights: vec![weights],
                    bias: vec![-6.0],
                    activation: Activation::Sigmoid,
                }],
            },
        }
    }

    #[test]
    fn predicts_from_record_row() {
        let model = age_sex_artifact();
        model.validate().unwrap();

        // 0.1 * 70 + 1 - 6 = 2 -> sigmoid > 0.5
        let old_male = PatientRecord {
            age: 70,
            ..PatientRecord::default()
        };
        assert_eq!(model.predict(&old_male.to_row()), Ok(Label::HighRisk));

        // 0.1 * 30 - 6 = -3 -> sigmoid < 0.5
        let young_female = PatientRecord {
            age: 30,
            sex: Sex::Female,
            ..PatientRecord::default()
        };
        let proba = model.predict_proba(&young_female.to_row()).unwrap();
        assert!(proba[0] > 0.9);
        assert_eq!(model.predict(&young_female.to_row()), Ok(Label::LowRisk));
    }

    #[test]
    fn rejects_width_mismatch() {
        let mut model = age_sex_artifact();
        model.columns.pop();
        assert!(model.validate().unwrap_err().contains("input_dim"));
    }

    #[test]
    fn rejects_bad_threshold() {
        let mut model = age_sex_artifact();
        model.threshold = 1.0;
        assert!(model.validate().is_err());
    }

    #[test]
    fn unseen_category_is_inference_error() {
        let model = age_sex_artifact();
        let mut row = PatientRecord::default().to_row();
        let mut renamed = Row::new();
        for (name, cell) in row.columns() {
            if name == "RestingECG" {
                renamed.push(name.clone(), Cell::Str("Abnormal".into()));
            } else {
                renamed.push(name.clone(), cell.clone());
            }
        }
        row = renamed;
        assert!(matches!(
            model.predict_proba(&row),
            Err(InferenceError::UnknownCategory { .. })
        ));
    }

    #[test]
    fn round_trips_through_json() {
        let json = serde_json::to_string(&age_sex_artifact()).unwrap();
        let model = DenseArtifact::from_json(&json).unwrap();
        assert_eq!(model.columns.len(), 11);
        assert_eq!(model.metadata().unwrap()["accuracy"], 0.873);
    }
}
