//! Application Configuration
//!
//! Configuration for the Auth application layer.

use chrono::Duration;

use crate::domain::token::TokenCodec;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC signing key for tokens (32 bytes, process-wide)
    pub token_secret: [u8; 32],
    /// Access token TTL (minutes scale)
    pub access_ttl: Duration,
    /// Refresh token TTL (days scale)
    pub refresh_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: [0u8; 32],
            access_ttl: Duration::minutes(15),
            refresh_ttl: Duration::days(7),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with a random token secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            token_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Build the token codec for this configuration
    pub fn codec(&self) -> TokenCodec {
        TokenCodec::new(self.token_secret, self.access_ttl, self.refresh_ttl)
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
