use std::{fmt, future::Future, time::Duration};

use async_trait::async_trait;
use redis::{
    AsyncCommands, Client, ConnectionAddr, ConnectionInfo, IntoConnectionInfo, RedisConnectionInfo,
    RedisResult,
    aio::{ConnectionManager, ConnectionManagerConfig},
};
use tokio::sync::OnceCell;

use super::CounterStore;
use crate::error::{Result, StorageError};

#[derive(Clone)]
pub struct RedisConfig {
    /// Full `redis://` URL; takes precedence over the individual fields below.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: Option<String>,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "127.0.0.1".to_string(),
            port: 6379,
            username: "default".to_string(),
            password: None,
        }
    }
}

impl RedisConfig {
    pub fn connection_info(&self) -> RedisResult<ConnectionInfo> {
        if let Some(ref url) = self.url {
            return url.as_str().into_connection_info();
        }

        Ok(ConnectionInfo {
            addr: ConnectionAddr::Tcp(self.host.clone(), self.port),
            redis: RedisConnectionInfo {
                username: Some(self.username.clone()),
                password: self.password.clone(),
                ..Default::default()
            },
        })
    }

    /// Address suitable for logs, never includes credentials.
    pub fn display_address(&self) -> String {
        match self.url {
            Some(ref url) => {
                let without_scheme = url
                    .trim_start_matches("redis://")
                    .trim_start_matches("rediss://");
                let authority = without_scheme.split('/').next().unwrap_or_default();
                authority.rsplit('@').next().unwrap_or("unknown").to_string()
            }
            None => format!("{}:{}", self.host, self.port),
        }
    }
}

impl fmt::Debug for RedisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisConfig")
            .field("address", &self.display_address())
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Counter store backed by a Redis hash.
///
/// The connection is established lazily on first use and then shared; the
/// connection manager reconnects on its own after a dropped link. A failed
/// initial connect leaves the cell empty so the next request tries again.
///
/// Each operation, including any wait for the connection, finishes within one
/// `timeout`. Connecting is attempted once per operation, never retried.
pub struct RedisStore {
    client: Client,
    connection: OnceCell<ConnectionManager>,
    timeout: Duration,
}

impl RedisStore {
    pub fn new(config: &RedisConfig, timeout: Duration) -> Result<Self> {
        let client = Client::open(config.connection_info()?)?;

        Ok(Self {
            client,
            connection: OnceCell::new(),
            timeout,
        })
    }

    async fn connection(&self) -> Result<ConnectionManager> {
        let connection = self
            .connection
            .get_or_try_init(|| async {
                let config = ConnectionManagerConfig::new()
                    .set_number_of_retries(0)
                    .set_connection_timeout(self.timeout)
                    .set_response_timeout(self.timeout);
                let connection =
                    ConnectionManager::new_with_config(self.client.clone(), config).await?;
                tracing::info!("Connected to Redis successfully");
                Ok::<_, StorageError>(connection)
            })
            .await
            .inspect_err(|e| tracing::error!("Redis connection error: {}", e))?;

        Ok(connection.clone())
    }

    /// Bounds a whole operation, connection wait included, by the store timeout.
    async fn bounded<T, F>(&self, operation: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match tokio::time::timeout(self.timeout, operation).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!("Redis did not answer within {:?}", self.timeout);
                Err(StorageError::Timeout(self.timeout))
            }
        }
    }
}

#[async_trait]
impl CounterStore for RedisStore {
    async fn increment_field(&self, map: &str, field: &str, delta: i64) -> Result<i64> {
        self.bounded(async {
            let mut connection = self.connection().await?;
            let value: i64 = connection.hincr(map, field, delta).await?;
            Ok::<_, StorageError>(value)
        })
        .await
    }

    async fn read_all(&self, map: &str) -> Result<Option<Vec<(String, String)>>> {
        let fields = self
            .bounded(async {
                let mut connection = self.connection().await?;
                let fields: Vec<(String, String)> = connection.hgetall(map).await?;
                Ok::<_, StorageError>(fields)
            })
            .await?;

        // Redis deletes empty hashes, so an empty reply always means the key is absent.
        if fields.is_empty() {
            Ok(None)
        } else {
            Ok(Some(fields))
        }
    }

    async fn ping(&self) -> Result<()> {
        self.bounded(async {
            let mut connection = self.connection().await?;
            let _: String = redis::cmd("PING").query_async(&mut connection).await?;
            Ok::<_, StorageError>(())
        })
        .await
    }
}
