use std::{fmt, sync::Arc, time::Duration};

use async_trait::async_trait;

use crate::error::Result;

mod memory;
mod redis_store;

pub use memory::MemoryStore;
pub use redis_store::{RedisConfig, RedisStore};

/// Remote hash-map service providing atomic field increments and full scans.
///
/// Implementations must make `increment_field` atomic: N concurrent increments of
/// the same field by 1 raise it by exactly N.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Adds `delta` to `field` inside `map`, creating both at zero first if absent.
    /// Returns the value after the increment.
    async fn increment_field(&self, map: &str, field: &str, delta: i64) -> Result<i64>;

    /// Reads every field of `map` in the store's enumeration order.
    /// Returns `None` when the map does not exist.
    async fn read_all(&self, map: &str) -> Result<Option<Vec<(String, String)>>>;

    async fn ping(&self) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreBackend {
    #[default]
    Redis,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend '{}', expected 'redis' or 'memory'", other)),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Redis => f.write_str("redis"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub redis: RedisConfig,
    /// Upper bound for a single store command, connection setup included.
    pub timeout: Duration,
}

/// Shared handle to the counter store, created once at startup and cloned into handlers.
#[derive(Clone)]
pub struct Store {
    counters: Arc<dyn CounterStore>,
}

impl Store {
    /// Builds the configured backend. Redis connects lazily on first use.
    pub fn connect(config: &StoreConfig) -> Result<Self> {
        let store = match config.backend {
            StoreBackend::Redis => Self {
                counters: Arc::new(RedisStore::new(&config.redis, config.timeout)?),
            },
            StoreBackend::Memory => Self::in_memory(),
        };
        Ok(store)
    }

    pub fn in_memory() -> Self {
        Self {
            counters: Arc::new(MemoryStore::new()),
        }
    }

    /// Wraps an arbitrary backend, mostly useful for tests.
    pub fn with_counters(counters: Arc<dyn CounterStore>) -> Self {
        Self { counters }
    }

    pub fn counters(&self) -> &dyn CounterStore {
        self.counters.as_ref()
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}
