//! Configuration for the worker process.

use anyhow::{Context, Result};
use mailscout_core::config::{CoreConfig, QueueConfig};
use mailscout_verifier::VerifierConfig;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub core: CoreConfig,
    pub queue: QueueConfig,
    pub verifier: VerifierConfig,
    /// How long `BLPOP` blocks before returning empty-handed.
    pub pop_timeout: Duration,
    /// How often a chunk's progress hash is refreshed mid-fan-out.
    pub progress_flush_every: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let core = CoreConfig::from_env()?;
        let queue = QueueConfig::from_env()?;

        let mut verifier = VerifierConfig::default();
        if let Ok(value) = env::var("WORKER_CONCURRENCY") {
            verifier.worker_concurrency = value
                .parse()
                .context("WORKER_CONCURRENCY must be a valid integer")?;
        }
        if let Ok(value) = env::var("DNS_CONCURRENCY") {
            verifier.dns_concurrency = value
                .parse()
                .context("DNS_CONCURRENCY must be a valid integer")?;
        }
        if let Ok(value) = env::var("SMTP_CONCURRENCY") {
            verifier.smtp_concurrency = value
                .parse()
                .context("SMTP_CONCURRENCY must be a valid integer")?;
        }
        if let Ok(value) = env::var("PER_MX_CONCURRENCY") {
            verifier.per_mx_concurrency = value
                .parse()
                .context("PER_MX_CONCURRENCY must be a valid integer")?;
        }
        if let Ok(value) = env::var("MAIL_FROM") {
            verifier.mail_from = value;
        }

        let pop_timeout_secs: u64 = env::var("POP_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .context("POP_TIMEOUT_SECS must be a valid integer")?;

        Ok(Self {
            core,
            queue,
            verifier,
            pop_timeout: Duration::from_secs(pop_timeout_secs),
            progress_flush_every: 50,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_structure() {
        let cfg = Config {
            core: CoreConfig {
                database_url: "postgres://localhost".to_string(),
                db_max_connections: 15,
            },
            queue: QueueConfig {
                redis_url: "redis://localhost".to_string(),
                queue_key: "mailscout:jobs".to_string(),
                chunk_size: 1000,
            },
            verifier: VerifierConfig::default(),
            pop_timeout: Duration::from_secs(5),
            progress_flush_every: 50,
        };
        assert_eq!(cfg.pop_timeout, Duration::from_secs(5));
        assert_eq!(cfg.progress_flush_every, 50);
    }
}
