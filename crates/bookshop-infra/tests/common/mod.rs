//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use bookshop_core::RequestContext;
use bookshop_core::domain::NewAccount;
use bookshop_core::ports::{NotifyError, Notifier, SessionStore, StoreError};
use bookshop_core::services::{AuthConfig, Authenticator};
use bookshop_infra::{
    Argon2PasswordHasher, InMemoryAccountRepository, InMemorySessionStore, RsaTokenCodec,
    TokenKeys,
};

pub const PRIVATE_PEM: &[u8] = include_bytes!("../../testdata/private.pem");
pub const PUBLIC_PEM: &[u8] = include_bytes!("../../testdata/public.pem");

/// Notifier that remembers what it was asked to send.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    /// Wait for detached deliveries to land, yielding to the runtime.
    pub async fn wait_for(&self, count: usize) -> Vec<(String, String)> {
        for _ in 0..100 {
            if self.sent.lock().unwrap().len() >= count {
                break;
            }
            tokio::task::yield_now().await;
        }
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, recipient: &str, content: &str) -> Result<(), NotifyError> {
        self.sent
            .lock()
            .unwrap()
            .push((recipient.to_string(), content.to_string()));
        Ok(())
    }
}

/// Session store that counts every call before delegating.
#[derive(Default)]
pub struct CountingStore {
    pub inner: InMemorySessionStore,
    pub calls: AtomicUsize,
}

impl CountingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionStore for CountingStore {
    async fn save_token(
        &self,
        ctx: &RequestContext,
        key: &str,
        ttl: Duration,
    ) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.save_token(ctx, key, ttl).await
    }

    async fn check_token(&self, ctx: &RequestContext, key: &str) -> Result<bool, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.check_token(ctx, key).await
    }

    async fn get_ttl(&self, ctx: &RequestContext, key: &str) -> Result<Duration, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_ttl(ctx, key).await
    }

    async fn revoke_token(&self, ctx: &RequestContext, key: &str) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.revoke_token(ctx, key).await
    }
}

/// An authenticator over in-memory collaborators, with handles to each.
pub struct Harness {
    pub auth: Authenticator,
    pub accounts: Arc<InMemoryAccountRepository>,
    pub hasher: Arc<Argon2PasswordHasher>,
    pub sessions: Arc<CountingStore>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn harness(config: AuthConfig) -> Harness {
    let accounts = Arc::new(InMemoryAccountRepository::new());
    let hasher = Arc::new(Argon2PasswordHasher::with_params(1024, 1, 1).unwrap());
    let codec = Arc::new(RsaTokenCodec::new(
        TokenKeys::from_pem(PRIVATE_PEM, PUBLIC_PEM).unwrap(),
    ));
    let sessions = Arc::new(CountingStore::default());
    let notifier = Arc::new(RecordingNotifier::default());

    let auth = Authenticator::new(
        accounts.clone(),
        hasher.clone(),
        codec,
        sessions.clone(),
        notifier.clone(),
        config,
    );

    Harness {
        auth,
        accounts,
        hasher,
        sessions,
        notifier,
    }
}

pub fn new_account(email: &str, password: &str) -> NewAccount {
    NewAccount {
        email: email.to_string(),
        password: password.to_string(),
        confirm_password: password.to_string(),
    }
}

pub fn ctx() -> RequestContext {
    RequestContext::new("test")
}
