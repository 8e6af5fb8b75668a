//! mailscout-autoscaler - queue-depth-driven worker scaling.

pub mod config;
pub mod driver;
pub mod scaling;

pub use config::Config;
pub use driver::Driver;

use redis::AsyncCommands;
use scaling::{IdleStreak, Reconciliation, desired_workers};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

pub fn select_driver(config: &Config) -> Driver {
    if config.use_cloud_driver() {
        let app_name = config
            .cloud_app_name
            .clone()
            .expect("use_cloud_driver implies cloud_app_name is set");
        let token = config.cloud_api_token.clone().unwrap_or_default();
        Driver::Cloud(driver::CloudMachinesDriver::new(app_name, token))
    } else {
        Driver::Compose(driver::ComposeDriver::new(config.compose_service_name.clone()))
    }
}

async fn queue_depth(
    conn: &mut redis::aio::MultiplexedConnection,
    queue_key: &str,
) -> u64 {
    match conn.llen::<_, u64>(queue_key).await {
        Ok(len) => len,
        Err(err) => {
            warn!(error = %err, "failed to sample queue depth, assuming empty");
            0
        }
    }
}

pub async fn run_autoscaler(
    mut redis_conn: redis::aio::MultiplexedConnection,
    driver: Driver,
    config: Config,
    shutdown: Option<CancellationToken>,
) {
    let mut streak = IdleStreak::default();

    loop {
        if let Some(ref token) = shutdown
            && token.is_cancelled()
        {
            info!("shutdown signal received, autoscaler exiting");
            break;
        }

        let q = queue_depth(&mut redis_conn, &config.queue.queue_key).await;
        let w = match driver.list_workers().await {
            Ok(w) => w,
            Err(err) => {
                warn!(error = %err, "failed to list workers, skipping this cycle");
                sleep_or_break(config.interval, &shutdown).await;
                continue;
            }
        };

        let needed = desired_workers(q, config.queue.chunk_size, config.min_workers, config.max_workers);
        info!(queue_depth = q, current_workers = w, needed, "autoscaler cycle");

        match streak.reconcile(needed, w, config.idle_checks_before_scale_down) {
            Reconciliation::ScaleUp(target) | Reconciliation::ScaleDown(target) => {
                if let Err(err) = driver.scale_to(target).await {
                    warn!(error = %err, target, "scale_to failed");
                }
            }
            Reconciliation::Hold => {}
        }

        sleep_or_break(config.interval, &shutdown).await;
    }
}

async fn sleep_or_break(interval: std::time::Duration, shutdown: &Option<CancellationToken>) {
    tokio::select! {
        () = tokio::time::sleep(interval) => {}
        () = async {
            if let Some(token) = shutdown {
                token.cancelled().await;
            } else {
                std::future::pending::<()>().await;
            }
        } => {}
    }
}
