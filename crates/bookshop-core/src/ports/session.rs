use std::time::Duration;

use async_trait::async_trait;

use crate::context::RequestContext;

/// TTL-indexed store of issued session tokens (Redis, in-memory).
///
/// Every call performs exactly one round trip bounded by the context
/// deadline. Nothing is retried.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Record `key` for `ttl`. Saving again resets the TTL.
    async fn save_token(
        &self,
        ctx: &RequestContext,
        key: &str,
        ttl: Duration,
    ) -> Result<(), StoreError>;

    /// Whether `key` is present. Absence is `Ok(false)`, not an error.
    async fn check_token(&self, ctx: &RequestContext, key: &str) -> Result<bool, StoreError>;

    /// Remaining lifetime of `key`.
    async fn get_ttl(&self, ctx: &RequestContext, key: &str) -> Result<Duration, StoreError>;

    /// Remove `key`. Removing an absent key succeeds.
    async fn revoke_token(&self, ctx: &RequestContext, key: &str) -> Result<(), StoreError>;
}

/// Session store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Session store unavailable: {0}")]
    Unavailable(String),

    #[error("Token not found")]
    TokenNotFound,

    #[error("Token has no expiry")]
    TtlNotFound,

    #[error("TTL must be greater than zero")]
    InvalidTtl,
}
