//! Authentication ports: password hashing and token signing.

use uuid::Uuid;

use crate::domain::Claim;
use crate::error::RepoError;
use crate::ports::StoreError;

/// Password hashing service.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plain text password with a fresh random salt.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored hash. A wrong password or an
    /// unparsable hash both yield `false`.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Signs claims into compact tokens and verifies them back.
pub trait TokenCodec: Send + Sync {
    /// Encode and sign a claim.
    fn issue(&self, claim: &Claim) -> Result<String, AuthError>;

    /// Verify the signature, decode the claim and validate it against the
    /// current time.
    fn parse_and_verify(&self, token: &str) -> Result<Claim, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("User already exists")]
    UserExists,

    #[error("User is inactive")]
    UserInactive,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid reset key")]
    InvalidResetKey,

    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    #[error("Insufficient permissions")]
    Unauthorized,

    #[error("Token has been revoked")]
    TokenRevoked,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Claim id is invalid")]
    ClaimIdInvalid,

    #[error("Claim email is invalid")]
    ClaimEmailInvalid,

    #[error("Token expired")]
    ClaimExpired,

    #[error("Token not yet valid")]
    ClaimNotYetValid,

    #[error("Invalid token: {0}")]
    ClaimInvalid(String),

    #[error("Token signature is invalid")]
    SignatureInvalid,

    #[error("Signing error: {0}")]
    Signing(String),

    #[error("Hashing error: {0}")]
    Hashing(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Repository(#[from] RepoError),
}
