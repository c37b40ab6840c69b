//! # Bookshop Infrastructure
//!
//! Concrete implementations of the ports defined in `bookshop-core`,
//! plus the observability pipeline that decorates every service.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL repositories via SeaORM
//! - `auth` - RS512 JWT + Argon2 authentication
//! - `redis` - Redis-backed session store

pub mod database;
pub mod memory;
pub mod notify;
pub mod observability;
pub mod session;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use memory::{InMemoryAccountRepository, InMemoryBookRepository, InMemoryOrderRepository};
pub use notify::{ConsoleNotifier, NopNotifier};
pub use observability::{Pipeline, ServiceMetrics};
pub use session::InMemorySessionStore;

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordHasher, KeyError, RsaTokenCodec, TokenKeys};

// Re-exports - Redis
#[cfg(feature = "redis")]
pub use session::{RedisConfig, RedisSessionStore};
