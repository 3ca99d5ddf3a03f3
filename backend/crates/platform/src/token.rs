//! Session Tokens
//!
//! HS256-signed JWTs carrying `{sub, exp}`. The secret is handed to
//! [`TokenService::new`] once at startup and never changes afterwards.
//!
//! Verification order:
//! 1. header algorithm must be HS256 (`Malformed` otherwise)
//! 2. `exp` must be in the future (`Expired`, even if the signature is bad)
//! 3. signature must match (`InvalidSignature`)

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, decode_header, encode,
    errors::ErrorKind as JwtErrorKind,
};
use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token lifetime used when the caller does not configure one
pub const DEFAULT_TOKEN_TTL: Duration = Duration::days(30);

/// A fresh 256-bit signing secret for processes that are not given one
pub fn generate_secret() -> [u8; 32] {
    let mut secret = [0u8; 32];
    OsRng.fill_bytes(&mut secret);
    secret
}

/// Token rejection reasons
///
/// Callers report all three as the same 401; the variant is for server logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token is malformed")]
    Malformed,

    #[error("Token has expired")]
    Expired,

    #[error("Token signature is invalid")]
    InvalidSignature,
}

impl TokenError {
    /// Short label for log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Malformed => "malformed",
            Self::Expired => "expired",
            Self::InvalidSignature => "invalid_signature",
        }
    }
}

/// Token signing errors
#[derive(Debug, Error)]
#[error("Token signing failed: {0}")]
pub struct TokenIssueError(#[from] jsonwebtoken::errors::Error);

/// Decoded claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// Expiry, seconds since the Unix epoch
    pub exp: i64,
}

/// Issues and verifies session tokens with one shared secret
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8]) -> Self {
        Self::with_ttl(secret, DEFAULT_TOKEN_TTL)
    }

    pub fn with_ttl(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `subject`, expiring `ttl` from now
    pub fn issue(&self, subject: &str) -> Result<String, TokenIssueError> {
        self.issue_at(subject, Utc::now())
    }

    pub fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> Result<String, TokenIssueError> {
        let claims = Claims {
            sub: subject.to_string(),
            exp: (now + self.ttl).timestamp(),
        };
        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    /// Verify a token and return its subject
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let header = decode_header(token).map_err(|_| TokenError::Malformed)?;
        if header.alg != Algorithm::HS256 {
            return Err(TokenError::Malformed);
        }

        // Expiry first, on unverified claims
        let unverified = decode::<Claims>(token, &self.decoding_key, &Self::unverified_validation())
            .map_err(|_| TokenError::Malformed)?;
        if now.timestamp() >= unverified.claims.exp {
            return Err(TokenError::Expired);
        }

        let verified = decode::<Claims>(token, &self.decoding_key, &Self::signed_validation())
            .map_err(|e| match e.kind() {
                JwtErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })?;

        Ok(verified.claims.sub)
    }

    // `exp` is compared against the caller's instant above, so the library's
    // own wall-clock check stays off in both passes.
    fn signed_validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp"]);
        validation
    }

    fn unverified_validation() -> Validation {
        let mut validation = Self::signed_validation();
        validation.insecure_disable_signature_validation();
        validation
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

    const SECRET: &[u8] = b"test-secret-which-is-long-enough";

    fn service() -> TokenService {
        TokenService::new(SECRET)
    }

    fn instant(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_issue_then_verify_returns_subject() {
        let tokens = service();
        let token = tokens.issue("user-123").unwrap();
        assert_eq!(tokens.verify(&token).unwrap(), "user-123");
    }

    #[test]
    fn test_expiry_is_thirty_days() {
        let tokens = service();
        let issued_at = instant(1_700_000_000);
        let token = tokens.issue_at("user-123", issued_at).unwrap();

        let just_before = issued_at + Duration::days(30) - Duration::seconds(1);
        assert_eq!(tokens.verify_at(&token, just_before).unwrap(), "user-123");

        // Expiry is exclusive
        let at_expiry = issued_at + Duration::days(30);
        assert_eq!(tokens.verify_at(&token, at_expiry), Err(TokenError::Expired));
    }

    #[test]
    fn test_expired_regardless_of_signature() {
        let issued_at = instant(1_700_000_000);
        let token = TokenService::new(b"some-other-secret")
            .issue_at("user-123", issued_at)
            .unwrap();

        let later = issued_at + Duration::days(31);
        assert_eq!(service().verify_at(&token, later), Err(TokenError::Expired));
    }

    #[test]
    fn test_wrong_secret_is_invalid_signature() {
        let token = TokenService::new(b"some-other-secret")
            .issue("user-123")
            .unwrap();
        assert_eq!(service().verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_tampered_payload_is_invalid_signature() {
        let tokens = service();
        let token = tokens.issue("user-123").unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let forged_claims = Claims {
            sub: "admin".to_string(),
            exp: Utc::now().timestamp() + 3600,
        };
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged_claims).unwrap());
        let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        assert_eq!(tokens.verify(&forged), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_other_algorithm_is_malformed() {
        let claims = Claims {
            sub: "user-123".to_string(),
            exp: Utc::now().timestamp() + 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert_eq!(service().verify(&token), Err(TokenError::Malformed));
    }

    #[test]
    fn test_unsigned_token_is_malformed() {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(br#"{"sub":"user-123","exp":9999999999}"#);
        let token = format!("{header}.{payload}.");

        assert_eq!(service().verify(&token), Err(TokenError::Malformed));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let tokens = service();
        assert_eq!(tokens.verify(""), Err(TokenError::Malformed));
        assert_eq!(tokens.verify("not-a-token"), Err(TokenError::Malformed));
        assert_eq!(tokens.verify("a.b.c"), Err(TokenError::Malformed));
    }

    #[test]
    fn test_missing_subject_is_malformed() {
        #[derive(Serialize)]
        struct ExpOnly {
            exp: i64,
        }
        let token = encode(
            &Header::new(Algorithm::HS256),
            &ExpOnly {
                exp: Utc::now().timestamp() + 3600,
            },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert_eq!(service().verify(&token), Err(TokenError::Malformed));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let output = format!("{:?}", service());
        assert!(output.contains("REDACTED"));
        assert!(!output.contains("test-secret"));
    }

    #[test]
    fn test_generated_secrets_differ() {
        let first = generate_secret();
        let second = generate_secret();
        assert_ne!(first, second);

        let token = TokenService::new(&first).issue("user-1").unwrap();
        assert_eq!(
            TokenService::new(&second).verify(&token),
            Err(TokenError::InvalidSignature)
        );
    }
}
