use thiserror::Error;

/// Main error type for the risk form
#[derive(Error, Debug)]
pub enum CardioError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Model errors
    #[error("Model load failed: {0}")]
    ModelLoad(String),

    #[error("Inference error: {0}")]
    Inference(#[from] InferenceError),

    // Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias for CardioError
pub type Result<T> = std::result::Result<T, CardioError>;

/// Specific error types raised by a classifier on a single row
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
    #[error("missing column: {column}")]
    MissingColumn { column: String },

    #[error("unexpected column: {column}")]
    UnexpectedColumn { column: String },

    #[error("column {column} has dtype {actual}, expected {expected}")]
    DtypeMismatch {
        column: String,
        expected: String,
        actual: String,
    },

    #[error("column {column} has unknown category {value:?}")]
    UnknownCategory { column: String, value: String },

    #[error("model produced invalid output: {0}")]
    InvalidOutput(String),

    #[error("model backend failed: {0}")]
    Backend(String),
}

impl From<CardioError> for InferenceError {
    fn from(err: CardioError) -> Self {
        match err {
            CardioError::Inference(inner) => inner,
            other => InferenceError::Backend(other.to_string()),
        }
    }
}
