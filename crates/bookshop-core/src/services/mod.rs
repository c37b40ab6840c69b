//! Concrete service implementations. Each one depends only on ports.

mod auth;
mod catalog;
mod order;
mod user;

pub use auth::{AuthConfig, Authenticator, RevocationPolicy};
pub use catalog::Catalog;
pub use order::Orders;
pub use user::Users;
