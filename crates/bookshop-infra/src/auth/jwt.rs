//! RS512 JWT codec.

use std::path::Path;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use bookshop_core::domain::Claim;
use bookshop_core::ports::{AuthError, TokenCodec};

/// Key loading errors.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("Failed to read key file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid RSA {kind} key: {reason}")]
    Parse { kind: &'static str, reason: String },
}

/// Parsed RSA key pair used for signing and verification.
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenKeys {
    /// Parse a PEM private key (PKCS#1 or PKCS#8) and its PEM public key.
    pub fn from_pem(private_pem: &[u8], public_pem: &[u8]) -> Result<Self, KeyError> {
        let encoding = EncodingKey::from_rsa_pem(private_pem).map_err(|e| KeyError::Parse {
            kind: "private",
            reason: e.to_string(),
        })?;
        let decoding = DecodingKey::from_rsa_pem(public_pem).map_err(|e| KeyError::Parse {
            kind: "public",
            reason: e.to_string(),
        })?;

        Ok(Self { encoding, decoding })
    }

    /// Read and parse both keys from disk.
    pub fn from_pem_files(
        private_path: impl AsRef<Path>,
        public_path: impl AsRef<Path>,
    ) -> Result<Self, KeyError> {
        let read = |path: &Path| {
            std::fs::read(path).map_err(|source| KeyError::Read {
                path: path.display().to_string(),
                source,
            })
        };

        let keys = Self::from_pem(&read(private_path.as_ref())?, &read(public_path.as_ref())?)?;
        tracing::info!(
            private_key = %private_path.as_ref().display(),
            public_key = %public_path.as_ref().display(),
            "Token signing keys loaded"
        );
        Ok(keys)
    }
}

/// Signs claims with RSA-SHA512 and verifies them with the public key.
///
/// Time-window checks are left to [`Claim::validate`] so that expiry and
/// not-before surface as their own errors rather than as generic decode
/// failures.
pub struct RsaTokenCodec {
    keys: TokenKeys,
    validation: Validation,
}

impl RsaTokenCodec {
    pub fn new(keys: TokenKeys) -> Self {
        let mut validation = Validation::new(Algorithm::RS512);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self { keys, validation }
    }
}

impl TokenCodec for RsaTokenCodec {
    fn issue(&self, claim: &Claim) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::RS512), claim, &self.keys.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    fn parse_and_verify(&self, token: &str) -> Result<Claim, AuthError> {
        let data = decode::<Claim>(token, &self.keys.decoding, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature
                | ErrorKind::InvalidAlgorithm
                | ErrorKind::InvalidAlgorithmName => AuthError::SignatureInvalid,
                _ => AuthError::ClaimInvalid(e.to_string()),
            }
        })?;

        data.claims.validate(Utc::now().timestamp())?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bookshop_core::domain::Account;
    use uuid::Uuid;

    use super::*;

    const PRIVATE_PEM: &[u8] = include_bytes!("../../testdata/private.pem");
    const PUBLIC_PEM: &[u8] = include_bytes!("../../testdata/public.pem");
    const OTHER_PUBLIC_PEM: &[u8] = include_bytes!("../../testdata/other_public.pem");

    fn codec() -> RsaTokenCodec {
        RsaTokenCodec::new(TokenKeys::from_pem(PRIVATE_PEM, PUBLIC_PEM).unwrap())
    }

    fn claim() -> Claim {
        let account = Account::new("reader@example.com".into(), "hash".into());
        Claim::for_account(&account, "test-issuer", Utc::now(), Duration::from_secs(3600))
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let codec = codec();
        let claim = claim();

        let token = codec.issue(&claim).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let decoded = codec.parse_and_verify(&token).unwrap();
        assert_eq!(decoded, claim);
    }

    #[test]
    fn test_verify_with_different_public_key() {
        let token = codec().issue(&claim()).unwrap();
        let other = RsaTokenCodec::new(TokenKeys::from_pem(PRIVATE_PEM, OTHER_PUBLIC_PEM).unwrap());

        assert!(matches!(
            other.parse_and_verify(&token),
            Err(AuthError::SignatureInvalid)
        ));
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let codec = codec();
        let token = codec.issue(&claim()).unwrap();
        let forged = codec
            .issue(&Claim {
                email: "attacker@example.com".into(),
                ..claim()
            })
            .unwrap();

        // Original header and signature around a different payload.
        let parts: Vec<&str> = token.split('.').collect();
        let forged_payload = forged.split('.').nth(1).unwrap();
        let spliced = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        assert!(matches!(
            codec.parse_and_verify(&spliced),
            Err(AuthError::SignatureInvalid)
        ));
    }

    #[test]
    fn test_symmetric_algorithm_is_rejected() {
        let hs_token = encode(
            &Header::new(Algorithm::HS512),
            &claim(),
            &EncodingKey::from_secret(b"shared-secret"),
        )
        .unwrap();

        assert!(matches!(
            codec().parse_and_verify(&hs_token),
            Err(AuthError::SignatureInvalid)
        ));
    }

    #[test]
    fn test_garbage_token_is_claim_invalid() {
        assert!(matches!(
            codec().parse_and_verify("invalid-token"),
            Err(AuthError::ClaimInvalid(_))
        ));
    }

    #[test]
    fn test_expired_claim() {
        let codec = codec();
        let mut claim = claim();
        claim.iat -= 7200;
        claim.nbf -= 7200;
        claim.exp -= 7200;

        let token = codec.issue(&claim).unwrap();
        assert!(matches!(
            codec.parse_and_verify(&token),
            Err(AuthError::ClaimExpired)
        ));
    }

    #[test]
    fn test_not_yet_valid_claim() {
        let codec = codec();
        let mut claim = claim();
        claim.nbf += 600;

        let token = codec.issue(&claim).unwrap();
        assert!(matches!(
            codec.parse_and_verify(&token),
            Err(AuthError::ClaimNotYetValid)
        ));
    }

    #[test]
    fn test_nil_id_claim() {
        let codec = codec();
        let mut claim = claim();
        claim.id = Uuid::nil();

        let token = codec.issue(&claim).unwrap();
        assert!(matches!(
            codec.parse_and_verify(&token),
            Err(AuthError::ClaimIdInvalid)
        ));
    }

    #[test]
    fn test_malformed_pem() {
        assert!(matches!(
            TokenKeys::from_pem(b"not a key", PUBLIC_PEM),
            Err(KeyError::Parse { kind: "private", .. })
        ));
        assert!(matches!(
            TokenKeys::from_pem(PRIVATE_PEM, b"not a key"),
            Err(KeyError::Parse { kind: "public", .. })
        ));
    }

    #[test]
    fn test_missing_key_file() {
        assert!(matches!(
            TokenKeys::from_pem_files("/nonexistent/private.pem", "/nonexistent/public.pem"),
            Err(KeyError::Read { .. })
        ));
    }
}
