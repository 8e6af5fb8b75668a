//! Mailscout Worker - background job consumer for the verification pipeline.

use anyhow::Result;
use mailscout_worker::{Config, run_worker};
use tokio_util::sync::CancellationToken;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    mailscout_shared::bootstrap::init_env();
    let _tracing_guard = mailscout_shared::bootstrap::init_tracing("worker");

    info!("starting mailscout worker");

    let config = Config::from_env()?;
    let pool = mailscout_shared::bootstrap::init_db(&config.core).await?;
    sqlx::migrate!("../../migrations").run(&pool).await?;
    let redis_conn = mailscout_shared::bootstrap::init_redis(&config.queue.redis_url).await?;

    let shutdown = CancellationToken::new();
    let shutdown_signal = shutdown.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        info!("ctrl-c received, shutting down worker");
        shutdown_signal.cancel();
    });

    run_worker(pool, redis_conn, config, Some(shutdown)).await
}
