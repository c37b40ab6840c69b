//! Per-call context carried through every service operation.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::ports::StoreError;

/// Request-scoped values: correlation id and an optional deadline.
///
/// Every service method takes a `&RequestContext` first so decorators and
/// store adapters see the same deadline the transport assigned.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub request_id: String,
    pub deadline: Option<Instant>,
}

impl RequestContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            deadline: None,
        }
    }

    /// Context for work that is not tied to an inbound request.
    pub fn background() -> Self {
        Self::new("background")
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Time left before the deadline, `None` when unbounded.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// Run a store round trip bounded by this context's deadline, or by
    /// `fallback` when the caller set none. Expiry is reported as
    /// [`StoreError::Unavailable`].
    pub async fn bounded<F, T>(&self, fallback: Duration, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        let deadline = self
            .deadline
            .unwrap_or_else(|| Instant::now() + fallback);

        tokio::time::timeout_at(deadline, call)
            .await
            .map_err(|_| StoreError::Unavailable("deadline exceeded".to_string()))?
    }
}
