use std::time::Duration;

use chrono::{DateTime, Utc};
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::Account;
use crate::ports::AuthError;

const SESSION_KEY_PREFIX: &str = "session:";

/// Identity and validity window carried inside a signed token.
///
/// Timestamps are unix seconds. A claim is only trusted after
/// [`Claim::validate`] succeeds against the current time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub id: Uuid,
    pub email: String,
    pub is_active: bool,
    #[serde(rename = "iss")]
    pub issuer: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
}

impl Claim {
    /// Build the claim for `account`, valid from `now` for `lifetime`.
    pub fn for_account(
        account: &Account,
        issuer: &str,
        now: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        let issued_at = now.timestamp();
        let lifetime = i64::try_from(lifetime.as_secs()).unwrap_or(i64::MAX);
        Self {
            id: account.id,
            email: account.email.clone(),
            is_active: account.is_active,
            issuer: issuer.to_string(),
            iat: issued_at,
            nbf: issued_at,
            exp: issued_at.saturating_add(lifetime),
        }
    }

    /// Check id, email, expiry and not-before, in that order.
    pub fn validate(&self, now: i64) -> Result<(), AuthError> {
        if self.id.is_nil() {
            return Err(AuthError::ClaimIdInvalid);
        }
        if !EmailAddress::is_valid(&self.email) {
            return Err(AuthError::ClaimEmailInvalid);
        }
        if now > self.exp {
            return Err(AuthError::ClaimExpired);
        }
        if now < self.nbf {
            return Err(AuthError::ClaimNotYetValid);
        }
        Ok(())
    }
}

/// Tokens handed back to the caller after login or impersonation.
/// No refresh protocol exists, so `refresh_token` is always `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: u64,
}

/// Revocation store key for a signed token: `session:<sha256 hex>`.
pub fn session_key(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    format!("{SESSION_KEY_PREFIX}{}", hex::encode(digest))
}
