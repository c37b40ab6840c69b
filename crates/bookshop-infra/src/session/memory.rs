//! In-memory session store - used as fallback when Redis is unavailable.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use bookshop_core::RequestContext;
use bookshop_core::ports::{SessionStore, StoreError};

struct Entry {
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|exp| now >= exp)
    }
}

/// In-memory session store with the same TTL semantics as Redis.
///
/// Expired entries are dropped lazily on access.
/// Note: sessions are lost on process restart and not shared between nodes.
pub struct InMemorySessionStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Insert a key with no expiry, as a plain `SET` would in Redis.
    #[cfg(test)]
    async fn insert_persistent(&self, key: &str) {
        self.entries
            .write()
            .await
            .insert(key.to_string(), Entry { expires_at: None });
    }

    async fn live_expiry(&self, key: &str) -> Option<Option<Instant>> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        let (expired, expires_at) = (entry.is_expired(now), entry.expires_at);
        drop(entries);

        if expired {
            // Re-check under the write lock: a concurrent save may have refreshed it.
            let mut entries = self.entries.write().await;
            if entries.get(key).is_some_and(|e| e.is_expired(Instant::now())) {
                entries.remove(key);
            }
            return None;
        }

        Some(expires_at)
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn save_token(
        &self,
        _ctx: &RequestContext,
        key: &str,
        ttl: Duration,
    ) -> Result<(), StoreError> {
        if ttl.is_zero() {
            return Err(StoreError::InvalidTtl);
        }

        self.entries.write().await.insert(
            key.to_string(),
            Entry {
                expires_at: Some(Instant::now() + ttl),
            },
        );
        Ok(())
    }

    async fn check_token(&self, _ctx: &RequestContext, key: &str) -> Result<bool, StoreError> {
        Ok(self.live_expiry(key).await.is_some())
    }

    async fn get_ttl(&self, _ctx: &RequestContext, key: &str) -> Result<Duration, StoreError> {
        match self.live_expiry(key).await {
            None => Err(StoreError::TokenNotFound),
            Some(None) => Err(StoreError::TtlNotFound),
            Some(Some(expires_at)) => Ok(expires_at.saturating_duration_since(Instant::now())),
        }
    }

    async fn revoke_token(&self, _ctx: &RequestContext, key: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_save_then_ttl_within_bounds() {
        let store = InMemorySessionStore::new();
        let ctx = RequestContext::background();

        store
            .save_token(&ctx, "session:a", Duration::from_secs(2))
            .await
            .unwrap();

        let ttl = store.get_ttl(&ctx, "session:a").await.unwrap();
        assert!(ttl > Duration::ZERO && ttl <= Duration::from_secs(2));
        assert!(store.check_token(&ctx, "session:a").await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires() {
        let store = InMemorySessionStore::new();
        let ctx = RequestContext::background();

        store
            .save_token(&ctx, "session:a", Duration::from_secs(2))
            .await
            .unwrap();
        tokio::time::advance(Duration::from_millis(2_500)).await;

        assert!(!store.check_token(&ctx, "session:a").await.unwrap());
        assert!(matches!(
            store.get_ttl(&ctx, "session:a").await,
            Err(StoreError::TokenNotFound)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_resave_resets_ttl() {
        let store = InMemorySessionStore::new();
        let ctx = RequestContext::background();

        store
            .save_token(&ctx, "session:a", Duration::from_secs(2))
            .await
            .unwrap();
        tokio::time::advance(Duration::from_millis(1_500)).await;
        store
            .save_token(&ctx, "session:a", Duration::from_secs(2))
            .await
            .unwrap();
        tokio::time::advance(Duration::from_millis(1_000)).await;

        let ttl = store.get_ttl(&ctx, "session:a").await.unwrap();
        assert_eq!(ttl, Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_missing_and_persistent_keys_are_distinct() {
        let store = InMemorySessionStore::new();
        let ctx = RequestContext::background();
        store.insert_persistent("session:forever").await;

        assert!(matches!(
            store.get_ttl(&ctx, "session:missing").await,
            Err(StoreError::TokenNotFound)
        ));
        assert!(matches!(
            store.get_ttl(&ctx, "session:forever").await,
            Err(StoreError::TtlNotFound)
        ));
        assert!(store.check_token(&ctx, "session:forever").await.unwrap());
    }

    #[tokio::test]
    async fn test_zero_ttl_rejected() {
        let store = InMemorySessionStore::new();
        let ctx = RequestContext::background();

        assert!(matches!(
            store.save_token(&ctx, "session:a", Duration::ZERO).await,
            Err(StoreError::InvalidTtl)
        ));
        assert!(!store.check_token(&ctx, "session:a").await.unwrap());
    }

    #[tokio::test]
    async fn test_revoke_is_idempotent() {
        let store = InMemorySessionStore::new();
        let ctx = RequestContext::background();

        store
            .save_token(&ctx, "session:a", Duration::from_secs(60))
            .await
            .unwrap();
        store.revoke_token(&ctx, "session:a").await.unwrap();
        store.revoke_token(&ctx, "session:a").await.unwrap();

        assert!(!store.check_token(&ctx, "session:a").await.unwrap());
    }
}
