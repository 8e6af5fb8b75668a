//! Server configuration from environment variables

use anyhow::{Context, Result};
use mailscout_core::config::{CoreConfig, QueueConfig};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub core: CoreConfig,
    pub queue: QueueConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("API_PORT must be a valid u16")?,
            core: CoreConfig::from_env()?,
            queue: QueueConfig::from_env()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_structure() {
        let config = Config {
            host: "0.0.0.0".to_string(),
            port: 3000,
            core: CoreConfig {
                database_url: "postgres://test".to_string(),
                db_max_connections: 15,
            },
            queue: QueueConfig {
                redis_url: "redis://localhost".to_string(),
                queue_key: "mailscout:jobs".to_string(),
                chunk_size: 1000,
            },
        };

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
    }
}
