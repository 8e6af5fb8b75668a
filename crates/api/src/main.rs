//! Mailscout API Server
//!
//! Axum-based ingress for submitting address lists and checking job status.

use anyhow::Result;
use mailscout_api::{AppState, config::Config, run_api};

#[tokio::main]
async fn main() -> Result<()> {
    mailscout_shared::bootstrap::init_env();
    let _tracing_guard = mailscout_shared::bootstrap::init_tracing("api");

    let config = Config::from_env()?;
    tracing::info!(host = %config.host, port = config.port, "server configuration loaded");

    let pool = mailscout_shared::bootstrap::init_db(&config.core).await?;
    sqlx::migrate!("../../migrations").run(&pool).await?;

    let redis_conn = mailscout_shared::bootstrap::init_redis(&config.queue.redis_url).await?;

    let state = AppState {
        pool,
        redis_conn,
        queue_config: config.queue.clone(),
    };

    run_api(state, &config).await?;

    Ok(())
}
