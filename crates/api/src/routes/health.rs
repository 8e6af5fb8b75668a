//! Liveness endpoint.

use axum::Json;
use axum::routing::get;
use axum::Router;
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
