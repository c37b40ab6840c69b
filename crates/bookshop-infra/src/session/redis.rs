//! Redis session store with a managed connection and per-call deadlines.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisError};

use bookshop_core::RequestContext;
use bookshop_core::ports::{SessionStore, StoreError};

/// Value stored under every session key. Only presence matters.
const SENTINEL: u8 = 1;

/// Redis connection configuration.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis URL (e.g., redis://localhost:6379)
    pub url: String,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Per-command deadline when the caller's context has none
    pub command_timeout: Duration,
    /// Whether to fallback to the in-memory store if Redis is unavailable
    pub fallback_to_memory: bool,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            connect_timeout: Duration::from_secs(5),
            command_timeout: Duration::from_millis(500),
            fallback_to_memory: true,
        }
    }
}

impl RedisConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: std::env::var("REDIS_URL").unwrap_or(defaults.url),
            connect_timeout: std::env::var("REDIS_CONNECT_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.connect_timeout),
            command_timeout: std::env::var("REDIS_COMMAND_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.command_timeout),
            fallback_to_memory: std::env::var("REDIS_FALLBACK_TO_MEMORY")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.fallback_to_memory),
        }
    }
}

/// Redis-backed session store.
///
/// The connection manager is cloned for each command, so every call holds
/// its own handle and releases it on return, error or cancellation.
pub struct RedisSessionStore {
    conn: ConnectionManager,
    config: RedisConfig,
}

impl RedisSessionStore {
    pub async fn new(config: RedisConfig) -> Result<Self, StoreError> {
        let client = Client::open(config.url.as_str()).map_err(unavailable)?;

        // Use timeout to prevent hanging if Redis is unreachable
        let conn = tokio::time::timeout(config.connect_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| StoreError::Unavailable("connection timed out".to_string()))?
            .map_err(unavailable)?;

        tracing::info!(url = %config.url, "Connected to Redis session store");

        Ok(Self { conn, config })
    }

    /// Create from environment configuration.
    pub async fn from_env() -> Result<Self, StoreError> {
        Self::new(RedisConfig::from_env()).await
    }
}

fn unavailable(e: RedisError) -> StoreError {
    tracing::warn!(error = %e, "Redis command failed");
    StoreError::Unavailable(e.to_string())
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn save_token(
        &self,
        ctx: &RequestContext,
        key: &str,
        ttl: Duration,
    ) -> Result<(), StoreError> {
        if ttl.is_zero() {
            return Err(StoreError::InvalidTtl);
        }
        let millis = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1);

        let mut conn = self.conn.clone();
        ctx.bounded(self.config.command_timeout, async move {
            conn.pset_ex::<_, _, ()>(key, SENTINEL, millis)
                .await
                .map_err(unavailable)
        })
        .await
    }

    async fn check_token(&self, ctx: &RequestContext, key: &str) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();
        ctx.bounded(self.config.command_timeout, async move {
            conn.exists::<_, bool>(key).await.map_err(unavailable)
        })
        .await
    }

    async fn get_ttl(&self, ctx: &RequestContext, key: &str) -> Result<Duration, StoreError> {
        let mut conn = self.conn.clone();
        let millis = ctx
            .bounded(self.config.command_timeout, async move {
                conn.pttl::<_, i64>(key).await.map_err(unavailable)
            })
            .await?;

        // PTTL: -2 when the key is missing, -1 when it has no expiry.
        match millis {
            -2 => Err(StoreError::TokenNotFound),
            -1 => Err(StoreError::TtlNotFound),
            ms if ms >= 0 => Ok(Duration::from_millis(ms as u64)),
            other => Err(StoreError::Unavailable(format!(
                "unexpected PTTL reply: {other}"
            ))),
        }
    }

    async fn revoke_token(&self, ctx: &RequestContext, key: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        ctx.bounded(self.config.command_timeout, async move {
            conn.del::<_, ()>(key).await.map_err(unavailable)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn get_test_store() -> Option<RedisSessionStore> {
        let config = RedisConfig {
            url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6389".to_string()),
            connect_timeout: Duration::from_secs(1),
            command_timeout: Duration::from_secs(1),
            fallback_to_memory: false,
        };

        RedisSessionStore::new(config).await.ok()
    }

    #[tokio::test]
    async fn test_redis_save_check_revoke() {
        let store = match get_test_store().await {
            Some(s) => s,
            None => {
                tracing::warn!("Redis not available, skipping test");
                return;
            }
        };
        let ctx = RequestContext::new("redis-test");
        let key = "session:test_redis_save_check_revoke";

        store
            .save_token(&ctx, key, Duration::from_secs(30))
            .await
            .unwrap();
        assert!(store.check_token(&ctx, key).await.unwrap());

        store.revoke_token(&ctx, key).await.unwrap();
        assert!(!store.check_token(&ctx, key).await.unwrap());
    }

    #[tokio::test]
    async fn test_redis_ttl_expiry() {
        let store = match get_test_store().await {
            Some(s) => s,
            None => return,
        };
        let ctx = RequestContext::new("redis-test");
        let key = "session:test_redis_ttl_expiry";

        store
            .save_token(&ctx, key, Duration::from_secs(2))
            .await
            .unwrap();
        let ttl = store.get_ttl(&ctx, key).await.unwrap();
        assert!(ttl > Duration::ZERO && ttl <= Duration::from_secs(2));

        // Wait for expiration
        tokio::time::sleep(Duration::from_millis(2_500)).await;
        assert!(!store.check_token(&ctx, key).await.unwrap());
        assert!(matches!(
            store.get_ttl(&ctx, key).await,
            Err(StoreError::TokenNotFound)
        ));
    }

    #[tokio::test]
    async fn test_redis_key_without_expiry() {
        let store = match get_test_store().await {
            Some(s) => s,
            None => return,
        };
        let ctx = RequestContext::new("redis-test");
        let key = "session:test_redis_key_without_expiry";

        let mut conn = store.conn.clone();
        conn.set::<_, _, ()>(key, SENTINEL).await.unwrap();

        assert!(matches!(
            store.get_ttl(&ctx, key).await,
            Err(StoreError::TtlNotFound)
        ));
        store.revoke_token(&ctx, key).await.unwrap();
    }
}
