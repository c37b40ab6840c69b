//! Authentication service: registration, login, token validation and
//! password management.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::context::RequestContext;
use crate::domain::{
    Account, Bundle, Claim, MIN_PASSWORD_LEN, NewAccount, normalize_email, session_key,
};
use crate::error::RepoError;
use crate::ports::{
    AccountRepository, AuthError, AuthService, Notifier, PasswordHasher, SessionStore, TokenCodec,
};

/// Whether issued tokens are tracked in the session store.
///
/// `Disabled` trusts any token with a valid signature until it expires.
/// `Enforced` records every token at login, requires the record on each
/// validation and deletes it on logout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevocationPolicy {
    #[default]
    Disabled,
    Enforced,
}

impl FromStr for RevocationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "disabled" | "off" | "false" => Ok(Self::Disabled),
            "enforced" | "on" | "true" => Ok(Self::Enforced),
            other => Err(format!("unknown revocation policy: {other}")),
        }
    }
}

impl fmt::Display for RevocationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("disabled"),
            Self::Enforced => f.write_str("enforced"),
        }
    }
}

/// Authentication settings, built once at startup.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub issuer: String,
    pub token_lifetime: Duration,
    pub revocation: RevocationPolicy,
    /// Accounts allowed to call [`AuthService::impersonate`].
    pub impersonators: Vec<Uuid>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            issuer: "bookshop".to_string(),
            token_lifetime: Duration::from_secs(24 * 3600),
            revocation: RevocationPolicy::Disabled,
            impersonators: Vec::new(),
        }
    }
}

/// The [`AuthService`] implementation.
pub struct Authenticator {
    accounts: Arc<dyn AccountRepository>,
    hasher: Arc<dyn PasswordHasher>,
    codec: Arc<dyn TokenCodec>,
    sessions: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
    config: AuthConfig,
}

impl Authenticator {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        hasher: Arc<dyn PasswordHasher>,
        codec: Arc<dyn TokenCodec>,
        sessions: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
        config: AuthConfig,
    ) -> Self {
        Self {
            accounts,
            hasher,
            codec,
            sessions,
            notifier,
            config,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Sign a token for `account` and, when enforced, track it.
    async fn issue_bundle(
        &self,
        ctx: &RequestContext,
        account: &Account,
    ) -> Result<Bundle, AuthError> {
        let lifetime = self.config.token_lifetime;
        let claim = Claim::for_account(account, &self.config.issuer, Utc::now(), lifetime);
        let token = self.codec.issue(&claim)?;

        if self.config.revocation == RevocationPolicy::Enforced {
            self.sessions
                .save_token(ctx, &session_key(&token), lifetime)
                .await?;
        }

        Ok(Bundle {
            access_token: token,
            refresh_token: None,
            expires_in: lifetime.as_secs(),
        })
    }

    /// The only password write path.
    async fn set_password(&self, mut account: Account, password: &str) -> Result<(), AuthError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        account.password_hash = self.hasher.hash(password)?;
        account.reset_key = None;
        account.updated_at = Utc::now();
        self.accounts.save(account).await?;
        Ok(())
    }

    /// Deliver a notification without waiting on it. Failures are logged.
    fn dispatch(&self, recipient: String, content: String) {
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            if let Err(e) = notifier.notify(&recipient, &content).await {
                tracing::warn!(error = %e, "Notification dispatch failed");
            }
        });
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(
        &self,
        _ctx: &RequestContext,
        input: NewAccount,
    ) -> Result<Account, AuthError> {
        input.validate()?;
        let email = normalize_email(&input.email);

        if let Some(existing) = self.accounts.find_by_email(&email).await? {
            return Err(if existing.is_active {
                AuthError::UserExists
            } else {
                AuthError::UserInactive
            });
        }

        let password_hash = self.hasher.hash(&input.password)?;
        // A concurrent registration can claim the email between lookup and save.
        let account = match self.accounts.save(Account::new(email, password_hash)).await {
            Ok(account) => account,
            Err(RepoError::Constraint(_)) => return Err(AuthError::UserExists),
            Err(e) => return Err(e.into()),
        };

        tracing::info!(account_id = %account.id, "Account registered");
        self.dispatch(
            account.email.clone(),
            "Welcome to the bookshop! Your account is ready.".to_string(),
        );

        Ok(account)
    }

    async fn login(
        &self,
        ctx: &RequestContext,
        email: &str,
        password: &str,
    ) -> Result<Bundle, AuthError> {
        let account = match self.accounts.find_by_email(&normalize_email(email)).await? {
            Some(account) => account,
            None => {
                tracing::debug!("Login rejected: unknown email");
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !self.hasher.verify(password, &account.password_hash) {
            tracing::debug!(account_id = %account.id, "Login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        if !account.is_active {
            return Err(AuthError::UserInactive);
        }

        self.issue_bundle(ctx, &account).await
    }

    async fn validate_token(&self, ctx: &RequestContext, token: &str) -> Result<Claim, AuthError> {
        let claim = self.codec.parse_and_verify(token)?;

        if self.config.revocation == RevocationPolicy::Enforced
            && !self.sessions.check_token(ctx, &session_key(token)).await?
        {
            return Err(AuthError::TokenRevoked);
        }

        Ok(claim)
    }

    async fn logout(&self, ctx: &RequestContext, token: &str) -> Result<(), AuthError> {
        let claim = self.codec.parse_and_verify(token)?;

        // Without tracking there is nothing to revoke; the token lives until it expires.
        if self.config.revocation == RevocationPolicy::Enforced {
            self.sessions.revoke_token(ctx, &session_key(token)).await?;
            tracing::info!(account_id = %claim.id, "Session revoked");
        }
        Ok(())
    }

    async fn change_password(
        &self,
        _ctx: &RequestContext,
        account_id: Uuid,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(AuthError::AccountNotFound(account_id))?;

        if !self.hasher.verify(old_password, &account.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        self.set_password(account, new_password).await
    }

    async fn request_password_reset(
        &self,
        _ctx: &RequestContext,
        email: &str,
    ) -> Result<(), AuthError> {
        let Some(mut account) = self.accounts.find_by_email(&normalize_email(email)).await? else {
            tracing::debug!("Password reset requested for unknown email");
            return Ok(());
        };
        if !account.is_active {
            return Ok(());
        }

        let reset_key = Uuid::new_v4().simple().to_string();
        account.reset_key = Some(reset_key.clone());
        account.updated_at = Utc::now();
        let account = self.accounts.save(account).await?;

        self.dispatch(
            account.email,
            format!("Use this key to reset your password: {reset_key}"),
        );
        Ok(())
    }

    async fn reset_password(
        &self,
        _ctx: &RequestContext,
        reset_key: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        if reset_key.trim().is_empty() {
            return Err(AuthError::InvalidResetKey);
        }

        let account = self
            .accounts
            .find_by_reset_key(reset_key)
            .await?
            .ok_or(AuthError::InvalidResetKey)?;

        self.set_password(account, new_password).await
    }

    async fn impersonate(
        &self,
        ctx: &RequestContext,
        caller: &Claim,
        account_id: Uuid,
    ) -> Result<Bundle, AuthError> {
        if caller.validate(Utc::now().timestamp()).is_err()
            || !self.config.impersonators.contains(&caller.id)
        {
            return Err(AuthError::Unauthorized);
        }

        let target = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(AuthError::AccountNotFound(account_id))?;

        if !target.is_active {
            return Err(AuthError::UserInactive);
        }

        tracing::info!(caller = %caller.id, target = %target.id, "Impersonation granted");
        self.issue_bundle(ctx, &target).await
    }
}
