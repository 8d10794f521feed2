use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Counter store did not answer within {0:?}")]
    Timeout(Duration),

    #[error("Counter store unavailable: {0}")]
    Unavailable(String),

    #[error("Stored win count for '{username}' is not an integer: {value:?}")]
    InvalidCount { username: String, value: String },

    #[error("Username is required")]
    InvalidUsername,
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    /// Errors caused by the counter store itself rather than by the data it holds.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            StorageError::Redis(_) | StorageError::Timeout(_) | StorageError::Unavailable(_)
        )
    }
}
