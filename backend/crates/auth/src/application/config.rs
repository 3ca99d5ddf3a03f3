//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::token::{DEFAULT_TOKEN_TTL, TokenService};

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Lifetime of issued bearer tokens (30 days)
    pub token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl: Duration::from_secs(30 * 24 * 3600),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Build the token service for this configuration
    pub fn token_service(&self, secret: &[u8]) -> TokenService {
        let ttl = chrono::Duration::from_std(self.token_ttl).unwrap_or(DEFAULT_TOKEN_TTL);
        TokenService::with_ttl(secret, ttl)
    }
}
