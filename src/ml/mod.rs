//! Model loading and inference (deploy-safe, CPU-only).
//!
//! Artifacts are JSON dense networks by default; ONNX graphs load through
//! `tract` when the `onnx` feature is enabled.

pub mod artifact;
pub mod cache;
pub mod classifier;
pub mod dense;
pub mod heuristic;
#[cfg(feature = "onnx")]
pub mod onnx;
pub mod schema;

pub use artifact::DenseArtifact;
pub use cache::{load_model, try_load_model, LoadOutcome, ModelCache, ModelFormat, SharedModel};
pub use classifier::Classifier;
pub use dense::{Activation, DenseLayer, DenseNetwork};
pub use heuristic::{fallback_heuristic, fallback_score, FallbackAssessment};
#[cfg(feature = "onnx")]
pub use onnx::{OnnxArtifact, OnnxModel};
pub use schema::{heart_schema, ColumnKind, ColumnSpec};
