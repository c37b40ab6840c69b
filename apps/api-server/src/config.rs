//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use anyhow::{Context, anyhow, bail};
use uuid::Uuid;

use bookshop_core::services::{AuthConfig, RevocationPolicy};
use bookshop_infra::database::DatabaseConfig;

#[cfg(feature = "redis")]
use bookshop_infra::RedisConfig;

/// Where the RS512 key pair is read from at startup.
#[derive(Debug, Clone)]
pub struct KeyPaths {
    pub private_key: String,
    pub public_key: String,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    #[cfg(feature = "redis")]
    pub redis: RedisConfig,
    pub keys: KeyPaths,
    pub auth: AuthConfig,
    /// Deadline given to every request's service calls.
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = AuthConfig::default();

        let revocation = match env::var("AUTH_REVOCATION") {
            Ok(value) => value
                .parse::<RevocationPolicy>()
                .map_err(|e| anyhow!(e))
                .context("AUTH_REVOCATION")?,
            Err(_) => defaults.revocation,
        };

        let impersonators = match env::var("AUTH_IMPERSONATORS") {
            Ok(value) => parse_impersonators(&value).context("AUTH_IMPERSONATORS")?,
            Err(_) => Vec::new(),
        };

        let token_lifetime = match env::var("JWT_LIFETIME_SECS") {
            Ok(value) => parse_lifetime(&value).context("JWT_LIFETIME_SECS")?,
            Err(_) => defaults.token_lifetime,
        };

        let auth = AuthConfig {
            issuer: env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
            token_lifetime,
            revocation,
            impersonators,
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database: DatabaseConfig::from_env(),
            #[cfg(feature = "redis")]
            redis: RedisConfig::from_env(),
            keys: KeyPaths {
                private_key: env::var("JWT_PRIVATE_KEY_PATH")
                    .unwrap_or_else(|_| "keys/private.pem".to_string()),
                public_key: env::var("JWT_PUBLIC_KEY_PATH")
                    .unwrap_or_else(|_| "keys/public.pem".to_string()),
            },
            auth,
            request_timeout: env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(Duration::from_secs(10)),
        })
    }
}

/// Token lifetime in whole seconds. Zero is rejected: the session store
/// refuses zero TTLs, so every login would fail.
fn parse_lifetime(value: &str) -> anyhow::Result<Duration> {
    let secs: u64 = value
        .trim()
        .parse()
        .with_context(|| format!("invalid number of seconds {value:?}"))?;
    if secs == 0 {
        bail!("token lifetime must be at least one second");
    }
    Ok(Duration::from_secs(secs))
}

/// Parse a comma-separated list of account ids. Blank entries are skipped.
fn parse_impersonators(value: &str) -> anyhow::Result<Vec<Uuid>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Uuid::parse_str(s).with_context(|| format!("invalid account id {s:?}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_impersonators() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let ids = parse_impersonators(&format!(" {a}, ,{b},")).unwrap();

        assert_eq!(ids, vec![a, b]);
        assert!(parse_impersonators("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_lifetime() {
        assert_eq!(parse_lifetime(" 3600 ").unwrap(), Duration::from_secs(3600));
        assert!(parse_lifetime("0").is_err());
        assert!(parse_lifetime("-5").is_err());
        assert!(parse_lifetime("a day").is_err());
    }

    #[test]
    fn test_parse_impersonators_rejects_garbage() {
        let err = parse_impersonators("not-a-uuid").unwrap_err();
        assert!(err.to_string().contains("not-a-uuid"));
    }
}
