//! Mailscout Autoscaler - scales the worker fleet to queue depth.

use anyhow::Result;
use mailscout_autoscaler::{Config, run_autoscaler, select_driver};
use tokio_util::sync::CancellationToken;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    mailscout_shared::bootstrap::init_env();
    let _tracing_guard = mailscout_shared::bootstrap::init_tracing("autoscaler");

    let config = Config::from_env()?;
    let driver = select_driver(&config);
    let redis_conn = mailscout_shared::bootstrap::init_redis(&config.queue.redis_url).await?;

    let shutdown = CancellationToken::new();
    let shutdown_signal = shutdown.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        info!("ctrl-c received, shutting down autoscaler");
        shutdown_signal.cancel();
    });

    run_autoscaler(redis_conn, driver, config, Some(shutdown)).await;
    Ok(())
}
