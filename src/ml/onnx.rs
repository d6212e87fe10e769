//! ONNX inference wrapper (pure Rust via `tract-onnx`).
//!
//! Lets a classifier exported from any training stack run without its
//! original runtime. The graph takes the one-hot encoded `[1, n]` f32 row;
//! the column preprocessing lives in a JSON sidecar next to the model
//! (`heart.onnx` -> `heart.onnx.schema.json`).

use serde::Deserialize;
use std::path::{Path, PathBuf};

use tract_onnx::prelude::*;

use crate::domain::{Label, Row};
use crate::error::{CardioError, InferenceError, Result};
use crate::ml::classifier::{probabilities_from_output, Classifier};
use crate::ml::schema::{self, ColumnSpec};

#[derive(Clone)]
pub struct OnnxModel {
    plan: TypedRunnableModel<TypedModel>,
    input_shape: Vec<usize>,
    output_dim: usize,
}

impl std::fmt::Debug for OnnxModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxModel")
            .field("input_shape", &self.input_shape)
            .field("output_dim", &self.output_dim)
            .finish()
    }
}

impl OnnxModel {
    /// Load an ONNX model and specialize it to a fixed `[1, input_dim]` f32 input.
    pub fn load_for_vec_input(path: &Path, input_dim: usize) -> Result<Self> {
        if input_dim == 0 {
            return Err(CardioError::Validation("input_dim must be > 0".to_string()));
        }
        let input_shape = [1, input_dim];

        let model = tract_onnx::onnx()
            .model_for_path(path)
            .map_err(|e| CardioError::ModelLoad(format!("onnx load failed: {e}")))?;

        let model = model
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, input_dim)),
            )
            .map_err(|e| CardioError::ModelLoad(format!("onnx input fact failed: {e}")))?;

        let plan = model
            .into_optimized()
            .map_err(|e| CardioError::ModelLoad(format!("onnx optimize failed: {e}")))?
            .into_runnable()
            .map_err(|e| CardioError::ModelLoad(format!("onnx runnable failed: {e}")))?;

        // Infer output_dim by running a dummy forward pass.
        let dummy =
            tract_ndarray::ArrayD::<f32>::zeros(tract_ndarray::IxDyn(&input_shape)).into_tvalue();
        let outputs = plan
            .run(tvec!(dummy))
            .map_err(|e| CardioError::ModelLoad(format!("onnx run failed: {e}")))?;
        let output_dim = outputs
            .first()
            .ok_or_else(|| CardioError::ModelLoad("onnx produced no outputs".to_string()))?
            .to_array_view::<f32>()
            .map_err(|e| CardioError::ModelLoad(format!("onnx output decode failed: {e}")))?
            .len();
        if output_dim == 0 {
            return Err(CardioError::ModelLoad(
                "onnx output has zero elements".to_string(),
            ));
        }

        Ok(Self {
            plan,
            input_shape: input_shape.to_vec(),
            output_dim,
        })
    }

    pub fn input_dim(&self) -> usize {
        self.input_shape.last().copied().unwrap_or(0)
    }

    pub fn output_dim(&self) -> usize {
        self.output_dim
    }

    /// Run inference on a single feature vector.
    pub fn predict(&self, input: &[f32]) -> std::result::Result<Vec<f32>, InferenceError> {
        if input.len() != self.input_dim() {
            return Err(InferenceError::Backend(format!(
                "onnx input dim mismatch: got {}, expected {} (shape={:?})",
                input.len(),
                self.input_dim(),
                self.input_shape
            )));
        }

        let tensor = tract_ndarray::ArrayD::<f32>::from_shape_vec(
            tract_ndarray::IxDyn(&self.input_shape),
            input.to_vec(),
        )
        .map_err(|e| InferenceError::Backend(format!("onnx input reshape failed: {e}")))?
        .into_tvalue();

        let outputs = self
            .plan
            .run(tvec!(tensor))
            .map_err(|e| InferenceError::Backend(format!("onnx run failed: {e}")))?;
        let first = outputs
            .first()
            .ok_or_else(|| InferenceError::Backend("onnx produced no outputs".to_string()))?;
        let arr = first
            .to_array_view::<f32>()
            .map_err(|e| InferenceError::Backend(format!("onnx output decode failed: {e}")))?;

        Ok(arr.iter().copied().collect())
    }
}

fn default_threshold() -> f64 {
    0.5
}

/// Sidecar describing the ONNX graph's input columns.
#[derive(Debug, Clone, Deserialize)]
struct OnnxSidecar {
    columns: Vec<ColumnSpec>,
    #[serde(default = "default_threshold")]
    threshold: f64,
    #[serde(default)]
    metadata: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct OnnxArtifact {
    columns: Vec<ColumnSpec>,
    threshold: f64,
    metadata: serde_json::Value,
    model: OnnxModel,
}

pub fn sidecar_path(model_path: &Path) -> PathBuf {
    let mut name = model_path.as_os_str().to_os_string();
    name.push(".schema.json");
    PathBuf::from(name)
}

impl OnnxArtifact {
    pub fn from_file(path: &Path) -> Result<Self> {
        let sidecar: OnnxSidecar =
            serde_json::from_str(&std::fs::read_to_string(sidecar_path(path))?)?;
        schema::validate_columns(&sidecar.columns).map_err(CardioError::Validation)?;
        if !(sidecar.threshold > 0.0 && sidecar.threshold < 1.0) {
            return Err(CardioError::Validation(format!(
                "threshold must be in (0, 1), got {}",
                sidecar.threshold
            )));
        }

        let model = OnnxModel::load_for_vec_input(path, schema::encoded_width(&sidecar.columns))?;
        if model.output_dim() > 2 {
            return Err(CardioError::ModelLoad(format!(
                "onnx output_dim must be 1 or 2, got {}",
                model.output_dim()
            )));
        }

        Ok(Self {
            columns: sidecar.columns,
            threshold: sidecar.threshold,
            metadata: sidecar.metadata,
            model,
        })
    }
}

impl Classifier for OnnxArtifact {
    fn kind(&self) -> &'static str {
        "onnx"
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
        let features: Vec<f32> = schema::encode(&self.columns, row)?
            .into_iter()
            .map(|v| v as f32)
            .collect();
        let output: Vec<f64> = self
            .model
            .predict(&features)?
            .into_iter()
            .map(f64::from)
            .collect();
        probabilities_from_output(&output)
    }

    fn predict(&self, row: &Row) -> std::result::Result<Label, InferenceError> {
        let proba = self.predict_proba(row)?;
        Ok(Label::from_probability(proba[1], self.threshold))
    }
}
