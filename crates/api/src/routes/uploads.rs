//! Minimal ingress for submitting address lists and checking job status.
//!
//! Accepts a plain text body, one address per line, rather than real
//! CSV/XLSX parsing — multipart upload parsing and format sniffing are out
//! of scope for this ingress.

use axum::Router;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::Json;
use mailscout_core::{JobId, StatusResult, SubmitResult};

use crate::error::ApiError;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/uploads", post(create_upload))
        .route("/uploads/{id}", get(get_upload))
}

async fn create_upload(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<SubmitResult>, ApiError> {
    let addresses: Vec<String> = body.lines().map(str::to_string).collect();

    let mut redis_conn = state.redis_conn.clone();
    let result = mailscout_producer::submit(
        &state.pool,
        &mut redis_conn,
        &state.queue_config,
        "upload.txt",
        &addresses,
    )
    .await?;

    Ok(Json(result))
}

async fn get_upload(
    State(state): State<AppState>,
    Path(id): Path<JobId>,
) -> Result<Json<StatusResult>, ApiError> {
    let result = mailscout_producer::status(&state.pool, &state.queue_config, id).await?;
    Ok(Json(result))
}
