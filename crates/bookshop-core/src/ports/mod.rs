//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod notify;
mod repository;
mod services;
mod session;

pub use auth::{AuthError, PasswordHasher, TokenCodec};
pub use notify::{NotifyError, Notifier};
pub use repository::{AccountRepository, BaseRepository, BookRepository, OrderRepository};
pub use services::{AuthService, CatalogService, OrderService, UserService};
pub use session::{SessionStore, StoreError};
