//! Mailscout unified server: runs the API, worker, and autoscaler as one
//! process sharing a database pool and a broker connection, coordinated by
//! a single cancellation token.

use anyhow::Result;
use redis::aio::MultiplexedConnection;
use sqlx::PgPool;
use tokio::signal;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<()> {
    mailscout_shared::bootstrap::init_env();
    let _guard = mailscout_shared::bootstrap::init_tracing("server");

    tracing::info!("starting mailscout unified server");

    let api_config = mailscout_api::config::Config::from_env()?;
    let worker_config = mailscout_worker::Config::from_env()?;
    let autoscaler_config = mailscout_autoscaler::Config::from_env()?;

    let pool = mailscout_shared::bootstrap::init_db(&api_config.core).await?;
    sqlx::migrate!("../../migrations").run(&pool).await?;
    tracing::info!("migrations completed");

    let shutdown = CancellationToken::new();

    let api_handle = spawn_api(pool.clone(), api_config, shutdown.clone());
    let worker_handle = spawn_worker(pool.clone(), worker_config, shutdown.clone());
    let autoscaler_handle = spawn_autoscaler(autoscaler_config, shutdown.clone());

    tracing::info!("all services started");

    wait_for_shutdown().await;
    tracing::info!("shutdown signal received");
    shutdown.cancel();

    let _ = tokio::join!(api_handle, worker_handle, autoscaler_handle);
    tracing::info!("all services stopped");

    Ok(())
}

fn spawn_api(
    pool: PgPool,
    config: mailscout_api::config::Config,
    shutdown: CancellationToken,
) -> tokio::task::JoinHandle<Result<()>> {
    tokio::spawn(async move {
        let redis_conn = mailscout_shared::bootstrap::init_redis(&config.queue.redis_url).await?;
        let state = mailscout_api::AppState {
            pool,
            redis_conn,
            queue_config: config.queue.clone(),
        };

        tokio::select! {
            result = mailscout_api::run_api(state, &config) => {
                tracing::error!("api service exited: {:?}", result);
                result.map_err(anyhow::Error::from)
            }
            () = shutdown.cancelled() => {
                tracing::info!("api service shutting down");
                Ok(())
            }
        }
    })
}

fn spawn_worker(
    pool: PgPool,
    config: mailscout_worker::Config,
    shutdown: CancellationToken,
) -> tokio::task::JoinHandle<Result<()>> {
    tokio::spawn(async move {
        let redis_conn: MultiplexedConnection =
            mailscout_shared::bootstrap::init_redis(&config.queue.redis_url).await?;
        mailscout_worker::run_worker(pool, redis_conn, config, Some(shutdown)).await
    })
}

fn spawn_autoscaler(
    config: mailscout_autoscaler::Config,
    shutdown: CancellationToken,
) -> tokio::task::JoinHandle<Result<()>> {
    tokio::spawn(async move {
        let redis_conn = mailscout_shared::bootstrap::init_redis(&config.queue.redis_url).await?;
        let driver = mailscout_autoscaler::select_driver(&config);
        mailscout_autoscaler::run_autoscaler(redis_conn, driver, config, Some(shutdown)).await;
        Ok(())
    })
}

async fn wait_for_shutdown() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install sigterm handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
