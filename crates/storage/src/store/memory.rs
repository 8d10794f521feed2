use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::CounterStore;
use crate::error::{Result, StorageError};

/// Process-local counter store with the same observable behaviour as a Redis hash:
/// values are kept as decimal text and fields keep their insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    maps: RwLock<HashMap<String, Vec<(String, String)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites a field with a raw value, bypassing increment semantics.
    pub async fn set_field(&self, map: &str, field: &str, value: impl Into<String>) {
        let value = value.into();
        let mut maps = self.maps.write().await;
        let fields = maps.entry(map.to_string()).or_default();

        match fields.iter_mut().find(|(name, _)| name == field) {
            Some((_, existing)) => *existing = value,
            None => fields.push((field.to_string(), value)),
        }
    }
}

#[async_trait]
impl CounterStore for MemoryStore {
    async fn increment_field(&self, map: &str, field: &str, delta: i64) -> Result<i64> {
        let mut maps = self.maps.write().await;
        let fields = maps.entry(map.to_string()).or_default();

        let index = match fields.iter().position(|(name, _)| name == field) {
            Some(index) => index,
            None => {
                fields.push((field.to_string(), "0".to_string()));
                fields.len() - 1
            }
        };
        let slot = &mut fields[index].1;

        let current: i64 = slot
            .parse()
            .map_err(|_| StorageError::Unavailable("hash value is not an integer".to_string()))?;
        let next = current.checked_add(delta).ok_or_else(|| {
            StorageError::Unavailable("increment or decrement would overflow".to_string())
        })?;

        *slot = next.to_string();
        Ok(next)
    }

    async fn read_all(&self, map: &str) -> Result<Option<Vec<(String, String)>>> {
        let maps = self.maps.read().await;
        Ok(maps.get(map).filter(|fields| !fields.is_empty()).cloned())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
