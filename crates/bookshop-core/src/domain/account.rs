use chrono::{DateTime, Utc};
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ports::AuthError;

/// Shortest password accepted on any password write.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Account entity - a registered customer and their credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub reset_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new active account with generated ID and timestamps.
    pub fn new(email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            is_active: true,
            reset_key: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Registration input.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl NewAccount {
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.email.trim().is_empty() {
            return Err(AuthError::Validation("email is required".to_string()));
        }
        if self.password.is_empty() {
            return Err(AuthError::Validation("password is required".to_string()));
        }
        if self.password != self.confirm_password {
            return Err(AuthError::Validation("passwords do not match".to_string()));
        }
        if !EmailAddress::is_valid(&normalize_email(&self.email)) {
            return Err(AuthError::Validation("invalid email address".to_string()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(())
    }
}

/// Emails are stored and looked up trimmed and lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
