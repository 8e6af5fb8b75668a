//! Mailscout API Server Library
//!
//! Thin axum ingress exercising the job producer's contract: submit an
//! address list, check a job's status.

pub mod config;
pub mod error;
mod routes;

use axum::Router;
use mailscout_core::config::QueueConfig;
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub redis_conn: redis::aio::MultiplexedConnection,
    pub queue_config: QueueConfig,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .merge(routes::uploads::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_api(state: AppState, config: &config::Config) -> Result<(), std::io::Error> {
    let app = create_router(state);
    let addr = format!("{}:{}", config.host, config.port);

    tracing::info!("API server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await
}
