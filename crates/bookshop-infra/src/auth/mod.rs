//! Authentication implementations.

mod jwt;
mod password;

pub use jwt::{KeyError, RsaTokenCodec, TokenKeys};
pub use password::Argon2PasswordHasher;
