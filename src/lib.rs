pub mod cli;
pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod ml;
pub mod report;
pub mod services;
pub mod tui;

pub use config::AppConfig;
pub use controller::{InferenceController, InferenceFailure, Outcome, Prediction};
pub use domain::{Label, PatientForm, PatientRecord, RiskLevel, Row};
pub use error::{CardioError, InferenceError, Result};
pub use ml::{Classifier, DenseArtifact, LoadOutcome, ModelCache, ModelFormat};
