pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod store;

pub use store::{CounterStore, MemoryStore, RedisStore, Store, StoreConfig};

/// Hash holding every player's win counter, keyed by username.
pub const LEADERBOARD_KEY: &str = "leaderboard";
