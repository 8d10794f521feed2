use std::time::Duration;

use anyhow::{Context, Result};
use storage::{
    StoreConfig,
    store::{RedisConfig, StoreBackend},
};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_STORE_TIMEOUT_MS: u64 = 2000;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub store: StoreConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match var("PORT") {
            Some(port) => port.parse().context("PORT must be a number")?,
            None => DEFAULT_PORT,
        };

        let backend = match var("STORE_BACKEND") {
            Some(backend) => backend
                .parse::<StoreBackend>()
                .map_err(anyhow::Error::msg)
                .context("Cannot parse STORE_BACKEND env variable")?,
            None => StoreBackend::default(),
        };

        let defaults = RedisConfig::default();
        let redis = RedisConfig {
            url: var("REDIS_URL"),
            host: var("REDIS_HOST").unwrap_or(defaults.host),
            port: match var("REDIS_PORT") {
                Some(port) => port.parse().context("REDIS_PORT must be a number")?,
                None => defaults.port,
            },
            username: var("REDIS_USERNAME").unwrap_or(defaults.username),
            password: var("REDIS_PASSWORD"),
        };

        let timeout_ms = match var("STORE_TIMEOUT_MS") {
            Some(ms) => ms
                .parse()
                .context("STORE_TIMEOUT_MS must be a number of milliseconds")?,
            None => DEFAULT_STORE_TIMEOUT_MS,
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            store: StoreConfig {
                backend,
                redis,
                timeout: Duration::from_millis(timeout_ms),
            },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.store.backend, StoreBackend::Redis);
        assert_eq!(config.store.redis.host, "127.0.0.1");
        assert_eq!(config.store.redis.port, 6379);
        assert_eq!(config.store.redis.username, "default");
        assert_eq!(config.store.redis.password, None);
        assert_eq!(config.store.timeout, Duration::from_millis(2000));
    }

    #[test]
    fn test_empty_port_falls_back_to_default() {
        let config = config_from(&[("PORT", "")]).unwrap();
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_reads_store_settings() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("REDIS_HOST", "redis.example.com"),
            ("REDIS_PORT", "12345"),
            ("REDIS_PASSWORD", "s3cret"),
            ("STORE_TIMEOUT_MS", "250"),
        ])
        .unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.store.redis.host, "redis.example.com");
        assert_eq!(config.store.redis.port, 12345);
        assert_eq!(config.store.redis.password.as_deref(), Some("s3cret"));
        assert_eq!(config.store.timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_memory_backend() {
        let config = config_from(&[("STORE_BACKEND", "memory")]).unwrap();
        assert_eq!(config.store.backend, StoreBackend::Memory);
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        assert!(config_from(&[("PORT", "three thousand")]).is_err());
        assert!(config_from(&[("REDIS_PORT", "x")]).is_err());
        assert!(config_from(&[("STORE_BACKEND", "sqlite")]).is_err());
    }
}
