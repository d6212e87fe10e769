//! HTTP surface for the risk form.
//!
//! A browser (or any other front end) posts the eleven fields as JSON and
//! gets the same outcome and rendering the terminal form shows. Liveness and
//! health probes report whether a model is loaded.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::controller::{InferenceController, Outcome};
use crate::domain::{PatientRecord, EXPECTED_SCHEMA, FIELD_DESCRIPTIONS, FIELD_NAMES};
use crate::report::{self, ModelInfo, RenderedFallback, RenderedResult};

/// Health status of the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Model loaded
    Healthy,
    /// Serving heuristic estimates only
    Degraded,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub model: ModelInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct SchemaColumn {
    pub name: &'static str,
    pub dtype: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictResponse {
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<RenderedResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<RenderedFallback>,
}

impl PredictResponse {
    pub fn new(outcome: Outcome) -> Self {
        let (result, fallback) = match &outcome {
            Outcome::Ok(p) => (Some(report::render_result(p.label, p.probabilities)), None),
            Outcome::ModelUnavailable(f) => (None, Some(report::render_fallback(f))),
            Outcome::InferenceError(_) => (None, None),
        };
        Self {
            outcome,
            result,
            fallback,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct ErrorBody {
    error: String,
    details: Vec<String>,
}

/// Shared state for the HTTP server
pub struct HttpState {
    pub started_at: DateTime<Utc>,
    pub controller: InferenceController,
}

impl HttpState {
    pub fn new(controller: InferenceController) -> Self {
        Self {
            started_at: Utc::now(),
            controller,
        }
    }

    pub fn health(&self) -> HealthResponse {
        let model = ModelInfo::from_controller(&self.controller);
        HealthResponse {
            status: if model.loaded {
                HealthStatus::Healthy
            } else {
                HealthStatus::Degraded
            },
            timestamp: Utc::now(),
            uptime_seconds: (Utc::now() - self.started_at).num_seconds().max(0) as u64,
            model,
        }
    }
}

/// Build the router; split out so tests can drive it without a socket.
pub fn router(state: Arc<HttpState>) -> Router {
    Router::new()
        .route("/healthz", get(liveness_handler))
        .route("/health", get(health_handler))
        .route("/schema", get(schema_handler))
        .route("/model", get(model_handler))
        .route("/predict", post(predict_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// HTTP server for the form
pub struct HttpServer {
    state: Arc<HttpState>,
    addr: SocketAddr,
}

impl HttpServer {
    pub fn new(state: Arc<HttpState>, addr: SocketAddr) -> Self {
        Self { state, addr }
    }

    /// Start the server; returns when the listener fails or shutdown is signalled
    pub async fn run(&self) -> crate::Result<()> {
        let app = router(Arc::clone(&self.state));

        info!("Starting HTTP server on {}", self.addr);

        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                info!("shutdown signal received");
            })
            .await
            .map_err(|e| crate::CardioError::Internal(format!("HTTP server error: {}", e)))?;

        Ok(())
    }
}

/// Liveness probe - is the process alive?
async fn liveness_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// Full health check; degraded still answers 200 since the heuristic serves
async fn health_handler(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.health()))
}

async fn schema_handler() -> impl IntoResponse {
    let columns: Vec<SchemaColumn> = FIELD_NAMES
        .iter()
        .zip(EXPECTED_SCHEMA.iter())
        .zip(FIELD_DESCRIPTIONS.iter())
        .map(|((name, (_, dtype)), (_, description))| SchemaColumn {
            name: *name,
            dtype: *dtype,
            description: *description,
        })
        .collect();
    Json(columns)
}

async fn model_handler(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    Json(ModelInfo::from_controller(&state.controller))
}

async fn predict_handler(
    State(state): State<Arc<HttpState>>,
    body: Result<Json<PatientRecord>, JsonRejection>,
) -> impl IntoResponse {
    let record = match body {
        Ok(Json(record)) => record,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "rejected predict body");
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorBody {
                    error: "invalid record".to_string(),
                    details: vec![rejection.body_text()],
                }),
            )
                .into_response();
        }
    };

    if let Err(details) = record.validate() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorBody {
                error: "values out of range".to_string(),
                details,
            }),
        )
            .into_response();
    }

    let outcome = state.controller.assess(&record);
    (StatusCode::OK, Json(PredictResponse::new(outcome))).into_response()
}
