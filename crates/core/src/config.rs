//! Shared configuration logic
//!
//! Handles loading of common environment variables used by every binary in
//! the workspace (worker, autoscaler, api, server).

use anyhow::{Context, Result};
use std::env;

/// Database connection configuration, shared by every service that touches
/// Postgres.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Database connection URL
    pub database_url: String,
    /// Pool size: base connections plus overflow, documented as one
    /// `max_connections` knob (sqlx does not split the two).
    pub db_max_connections: u32,
}

impl CoreConfig {
    /// Load common configuration from environment variables.
    ///
    /// This will also initialize dotenv if it hasn't been done yet.
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            db_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a valid integer")?,
        })
    }
}

/// Broker/queue configuration shared by the producer, worker, and
/// autoscaler.
#[derive(Debug, Clone)]
pub struct QueueConfig {
    pub redis_url: String,
    pub queue_key: String,
    pub chunk_size: usize,
}

impl QueueConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            redis_url: env::var("REDIS_URL").context("REDIS_URL must be set")?,
            queue_key: env::var("QUEUE_KEY").unwrap_or_else(|_| "mailscout:jobs".to_string()),
            chunk_size: env::var("CHUNK_SIZE")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .context("CHUNK_SIZE must be a valid integer")?,
        })
    }

    pub fn progress_key(&self, job_id: crate::types::JobId) -> String {
        format!("progress:{job_id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_key_format() {
        let cfg = QueueConfig {
            redis_url: "redis://localhost".to_string(),
            queue_key: "mailscout:jobs".to_string(),
            chunk_size: 1000,
        };
        let id = crate::types::JobId::new();
        assert_eq!(cfg.progress_key(id), format!("progress:{id}"));
    }
}
