//! Application state - shared across all handlers.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use prometheus::Registry;

use bookshop_core::ports::{
    AccountRepository, AuthService, BookRepository, CatalogService, OrderRepository, OrderService,
    SessionStore, UserService,
};
use bookshop_core::services::{AuthConfig, Authenticator, Catalog, Orders, RevocationPolicy, Users};
use bookshop_infra::{
    Argon2PasswordHasher, ConsoleNotifier, InMemoryAccountRepository, InMemoryBookRepository,
    InMemoryOrderRepository, InMemorySessionStore, Pipeline, RsaTokenCodec, ServiceMetrics,
    TokenKeys,
};

#[cfg(feature = "postgres")]
use bookshop_infra::database::{
    self, PostgresAccountRepository, PostgresBookRepository, PostgresOrderRepository,
};
#[cfg(feature = "redis")]
use bookshop_infra::RedisSessionStore;

use crate::config::AppConfig;

/// Shared application state. Every service is already decorated.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthService>,
    pub catalog: Arc<dyn CatalogService>,
    pub orders: Arc<dyn OrderService>,
    pub users: Arc<dyn UserService>,
    pub registry: Registry,
    pub request_timeout: Duration,
}

/// The persistence adapters the services are built on.
pub struct Repositories {
    pub accounts: Arc<dyn AccountRepository>,
    pub books: Arc<dyn BookRepository>,
    pub orders: Arc<dyn OrderRepository>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            accounts: Arc::new(InMemoryAccountRepository::new()),
            books: Arc::new(InMemoryBookRepository::new()),
            orders: Arc::new(InMemoryOrderRepository::new()),
        }
    }

    /// Postgres when configured and reachable, in-memory otherwise.
    #[cfg(feature = "postgres")]
    async fn connect(config: &AppConfig) -> Self {
        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Self::in_memory();
        };

        match database::connect(db_config).await {
            Ok(conn) => Self {
                accounts: Arc::new(PostgresAccountRepository::new(conn.clone())),
                books: Arc::new(PostgresBookRepository::new(conn.clone())),
                orders: Arc::new(PostgresOrderRepository::new(conn)),
            },
            Err(e) => {
                tracing::error!(error = %e, "Failed to connect to database. Using in-memory fallback.");
                Self::in_memory()
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn connect(_config: &AppConfig) -> Self {
        tracing::info!("Running without postgres feature - using in-memory repositories");
        Self::in_memory()
    }
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let repos = Repositories::connect(config).await;
        let sessions = session_store(config).await?;
        let keys = TokenKeys::from_pem_files(&config.keys.private_key, &config.keys.public_key)
            .context("loading JWT key pair")?;

        let state = Self::assemble(
            repos,
            sessions,
            keys,
            config.auth.clone(),
            config.request_timeout,
        )?;

        tracing::info!(revocation = %config.auth.revocation, "Application state initialized");
        Ok(state)
    }

    /// Wire the services over the given adapters and decorate each one.
    pub fn assemble(
        repos: Repositories,
        sessions: Arc<dyn SessionStore>,
        keys: TokenKeys,
        auth: AuthConfig,
        request_timeout: Duration,
    ) -> anyhow::Result<Self> {
        let registry = Registry::new();
        let pipeline = Pipeline::new(
            ServiceMetrics::register(&registry).context("registering service metrics")?,
        );

        let authenticator = Authenticator::new(
            repos.accounts.clone(),
            Arc::new(Argon2PasswordHasher::new()),
            Arc::new(RsaTokenCodec::new(keys)),
            sessions,
            Arc::new(ConsoleNotifier),
            auth,
        );

        Ok(Self {
            auth: Arc::new(pipeline.wrap("auth", authenticator)),
            catalog: Arc::new(pipeline.wrap("catalog", Catalog::new(repos.books.clone()))),
            orders: Arc::new(pipeline.wrap("orders", Orders::new(repos.orders, repos.books))),
            users: Arc::new(pipeline.wrap("users", Users::new(repos.accounts))),
            registry,
            request_timeout,
        })
    }
}

/// Session store for the configured revocation policy.
///
/// Without enforcement the store is never consulted, so no Redis
/// connection is opened.
async fn session_store(config: &AppConfig) -> anyhow::Result<Arc<dyn SessionStore>> {
    if config.auth.revocation == RevocationPolicy::Disabled {
        tracing::info!("Token revocation disabled. Sessions are not tracked.");
        return Ok(Arc::new(InMemorySessionStore::new()));
    }

    #[cfg(feature = "redis")]
    match RedisSessionStore::new(config.redis.clone()).await {
        Ok(store) => return Ok(Arc::new(store)),
        Err(e) if config.redis.fallback_to_memory => {
            tracing::warn!(error = %e, "Redis unavailable. Using in-memory session store.");
        }
        Err(e) => return Err(e).context("connecting to Redis session store"),
    }

    #[cfg(not(feature = "redis"))]
    tracing::info!("Running without redis feature - using in-memory session store");

    Ok(Arc::new(InMemorySessionStore::new()))
}
