//! Soft model loading and the load-once handle.
//!
//! A load failure never reaches the caller as an error: it is logged, kept
//! as a notice for the UI, and the handle stays absent for the life of the
//! cache. Callers then use the fallback heuristic.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::{info, warn};

use crate::error::{CardioError, Result};
use crate::ml::artifact::DenseArtifact;
use crate::ml::classifier::Classifier;

/// Shared read-only model handle.
pub type SharedModel = Arc<dyn Classifier>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    /// Pick by file extension (`.onnx` -> onnx, anything else -> dense).
    #[default]
    Auto,
    Dense,
    Onnx,
}

impl ModelFormat {
    fn resolve(self, path: &Path) -> ModelFormat {
        match self {
            ModelFormat::Auto => {
                if path.extension().and_then(|e| e.to_str()) == Some("onnx") {
                    ModelFormat::Onnx
                } else {
                    ModelFormat::Dense
                }
            }
            explicit => explicit,
        }
    }
}

impl std::str::FromStr for ModelFormat {
    type Err = CardioError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(ModelFormat::Auto),
            "dense" | "json" => Ok(ModelFormat::Dense),
            "onnx" => Ok(ModelFormat::Onnx),
            other => Err(CardioError::Validation(format!(
                "unknown model format {other:?} (expected auto, dense or onnx)"
            ))),
        }
    }
}

/// Read a model artifact, surfacing every failure as an error.
pub fn try_load_model(path: &Path, format: ModelFormat) -> Result<SharedModel> {
    if !path.exists() {
        return Err(CardioError::ModelLoad(format!(
            "model file {} not found",
            path.display()
        )));
    }

    match format.resolve(path) {
        ModelFormat::Onnx => load_onnx(path),
        _ => {
            let artifact = DenseArtifact::from_file(path)
                .map_err(|e| CardioError::ModelLoad(format!("{}: {e}", path.display())))?;
            Ok(Arc::new(artifact))
        }
    }
}

#[cfg(feature = "onnx")]
fn load_onnx(path: &Path) -> Result<SharedModel> {
    let artifact = crate::ml::onnx::OnnxArtifact::from_file(path)
        .map_err(|e| CardioError::ModelLoad(format!("{}: {e}", path.display())))?;
    Ok(Arc::new(artifact))
}

#[cfg(not(feature = "onnx"))]
fn load_onnx(path: &Path) -> Result<SharedModel> {
    Err(CardioError::ModelLoad(format!(
        "{}: ONNX support not compiled in (enable the `onnx` feature)",
        path.display()
    )))
}

/// Result of a soft load: the model, or the reason there is none.
#[derive(Clone)]
pub enum LoadOutcome {
    Loaded(SharedModel),
    Unavailable { notice: String },
}

impl LoadOutcome {
    pub fn model(&self) -> Option<SharedModel> {
        match self {
            LoadOutcome::Loaded(model) => Some(Arc::clone(model)),
            LoadOutcome::Unavailable { .. } => None,
        }
    }

    pub fn notice(&self) -> Option<&str> {
        match self {
            LoadOutcome::Loaded(_) => None,
            LoadOutcome::Unavailable { notice } => Some(notice.as_str()),
        }
    }
}

impl std::fmt::Debug for LoadOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadOutcome::Loaded(model) => f.debug_tuple("Loaded").field(&model.kind()).finish(),
            LoadOutcome::Unavailable { notice } => f
                .debug_struct("Unavailable")
                .field("notice", notice)
                .finish(),
        }
    }
}

/// Load a model without ever failing: errors become an `Unavailable` notice.
pub fn load_model(path: Option<&Path>, format: ModelFormat) -> LoadOutcome {
    let Some(path) = path else {
        warn!("no model path configured, using fallback heuristic");
        return LoadOutcome::Unavailable {
            notice: "No model path configured; running in demo mode".to_string(),
        };
    };

    match try_load_model(path, format) {
        Ok(model) => {
            info!(
                path = %path.display(),
                kind = model.kind(),
                features = model.expected_schema().len(),
                "model loaded"
            );
            LoadOutcome::Loaded(model)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "model unavailable, using fallback heuristic");
            LoadOutcome::Unavailable {
                notice: format!("Model unavailable ({e}); running in demo mode"),
            }
        }
    }
}

/// Load-once model handle.
///
/// The first `get_or_load` reads the artifact; later calls return the same
/// outcome without touching the filesystem.
#[derive(Debug)]
pub struct ModelCache {
    path: Option<PathBuf>,
    format: ModelFormat,
    slot: OnceLock<LoadOutcome>,
    loads: AtomicUsize,
}

static GLOBAL: OnceLock<ModelCache> = OnceLock::new();

impl ModelCache {
    pub fn new(path: Option<PathBuf>, format: ModelFormat) -> Self {
        Self {
            path,
            format,
            slot: OnceLock::new(),
            loads: AtomicUsize::new(0),
        }
    }

    /// Pre-populated cache, for callers that already hold a model.
    pub fn with_model(model: SharedModel) -> Self {
        let cache = Self::new(None, ModelFormat::Auto);
        let _ = cache.slot.set(LoadOutcome::Loaded(model));
        cache
    }

    /// Process-wide cache. The first caller's path and format win.
    pub fn global(path: Option<PathBuf>, format: ModelFormat) -> &'static ModelCache {
        GLOBAL.get_or_init(|| ModelCache::new(path, format))
    }

    pub fn get_or_load(&self) -> &LoadOutcome {
        self.slot.get_or_init(|| {
            self.loads.fetch_add(1, Ordering::SeqCst);
            load_model(self.path.as_deref(), self.format)
        })
    }

    /// Model handle, if one loaded.
    pub fn model(&self) -> Option<SharedModel> {
        self.get_or_load().model()
    }

    /// How many times the artifact has been read.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
