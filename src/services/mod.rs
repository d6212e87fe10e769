pub mod http;

pub use http::{HealthResponse, HealthStatus, HttpServer, HttpState, PredictResponse};
