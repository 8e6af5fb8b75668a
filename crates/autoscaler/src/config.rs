//! Configuration for the autoscaler process.

use anyhow::{Context, Result};
use mailscout_core::config::QueueConfig;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub queue: QueueConfig,
    pub min_workers: u32,
    pub max_workers: u32,
    pub interval: Duration,
    pub idle_checks_before_scale_down: u32,
    /// Machines API base URL and token, used only when the cloud driver is
    /// selected.
    pub cloud_app_name: Option<String>,
    pub cloud_api_token: Option<String>,
    pub compose_service_name: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let queue = QueueConfig::from_env()?;

        Ok(Self {
            queue,
            min_workers: env::var("MIN_WORKERS")
                .unwrap_or_else(|_| "1".to_string())
                .parse()
                .context("MIN_WORKERS must be a valid integer")?,
            max_workers: env::var("MAX_WORKERS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("MAX_WORKERS must be a valid integer")?,
            interval: Duration::from_secs(
                env::var("INTERVAL")
                    .unwrap_or_else(|_| "12".to_string())
                    .parse()
                    .context("INTERVAL must be a valid integer")?,
            ),
            idle_checks_before_scale_down: env::var("IDLE_CHECKS_BEFORE_SCALE_DOWN")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .context("IDLE_CHECKS_BEFORE_SCALE_DOWN must be a valid integer")?,
            cloud_app_name: env::var("CLOUD_APP_NAME").ok(),
            cloud_api_token: env::var("CLOUD_API_TOKEN").ok(),
            compose_service_name: env::var("COMPOSE_WORKER_SERVICE")
                .unwrap_or_else(|_| "worker".to_string()),
        })
    }

    /// The cloud driver is selected when a cloud app name is present in the
    /// environment; otherwise the local compose driver is used.
    pub fn use_cloud_driver(&self) -> bool {
        self.cloud_app_name.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_use_cloud_driver_requires_app_name() {
        let queue = QueueConfig {
            redis_url: "redis://localhost".to_string(),
            queue_key: "mailscout:jobs".to_string(),
            chunk_size: 1000,
        };
        let mut config = Config {
            queue,
            min_workers: 1,
            max_workers: 10,
            interval: Duration::from_secs(12),
            idle_checks_before_scale_down: 3,
            cloud_app_name: None,
            cloud_api_token: None,
            compose_service_name: "worker".to_string(),
        };
        assert!(!config.use_cloud_driver());
        config.cloud_app_name = Some("mailscout-prod".to_string());
        assert!(config.use_cloud_driver());
    }
}
