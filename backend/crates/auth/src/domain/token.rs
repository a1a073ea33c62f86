//! Token Codec
//!
//! Encodes and decodes signed tokens carrying claims. Wire format is
//! `base64url(JSON claims) + "." + base64url(HMAC-SHA256 signature)`,
//! with the signature computed over the encoded claims segment.
//!
//! Two token kinds share the format:
//! - access: short TTL, carries only the subject user ID; never persisted
//! - refresh: long TTL, additionally carries the session ID and is only
//!   usable while that session row exists (checked by the use cases,
//!   not here - the codec is deliberately stateless)
//!
//! The signing key is process-wide configuration, loaded once at
//! startup and never rotated mid-process.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{Duration, Utc};
use derive_more::Display;
use hmac::{Hmac, Mac};
use kernel::id::{SessionId, UserId};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Token kind claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    #[display("access")]
    Access,
    #[display("refresh")]
    Refresh,
}

/// Signed token claim set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject user ID
    pub sub: Uuid,
    /// Session ID (refresh tokens only)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sid: Option<Uuid>,
    /// Expiry (Unix timestamp, seconds)
    pub exp: i64,
    /// Token kind
    pub kind: TokenKind,
}

/// Stateless signed-token codec
#[derive(Clone)]
pub struct TokenCodec {
    secret: [u8; 32],
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: [u8; 32], access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            secret,
            access_ttl,
            refresh_ttl,
        }
    }

    /// Issue an access token for a user
    pub fn issue_access_token(&self, user_id: &UserId) -> String {
        self.encode(&Claims {
            sub: *user_id.as_uuid(),
            sid: None,
            exp: (Utc::now() + self.access_ttl).timestamp(),
            kind: TokenKind::Access,
        })
    }

    /// Issue a refresh token bound to a session
    pub fn issue_refresh_token(&self, user_id: &UserId, session_id: &SessionId) -> String {
        self.encode(&Claims {
            sub: *user_id.as_uuid(),
            sid: Some(*session_id.as_uuid()),
            exp: (Utc::now() + self.refresh_ttl).timestamp(),
            kind: TokenKind::Refresh,
        })
    }

    /// Check signature, expiry and kind of a refresh token
    ///
    /// Returns false (never errors) on malformed, tampered, expired or
    /// wrong-kind input. Session existence is NOT checked here.
    pub fn validate_refresh_token(&self, token: &str) -> bool {
        matches!(
            self.decode(token),
            Some(Claims {
                kind: TokenKind::Refresh,
                sid: Some(_),
                ..
            })
        )
    }

    /// Verify an access token, returning its subject user ID
    pub fn validate_access_token(&self, token: &str) -> Option<UserId> {
        match self.decode(token)? {
            Claims {
                kind: TokenKind::Access,
                sub,
                ..
            } => Some(UserId::from_uuid(sub)),
            _ => None,
        }
    }

    /// Session ID claim of a refresh token
    ///
    /// Only meaningful after `validate_refresh_token` succeeded.
    pub fn session_id_of(&self, token: &str) -> Option<SessionId> {
        self.decode(token)?.sid.map(SessionId::from_uuid)
    }

    /// Subject user ID claim of a token
    pub fn user_id_of(&self, token: &str) -> Option<UserId> {
        Some(UserId::from_uuid(self.decode(token)?.sub))
    }

    /// Decode a token after verifying signature and expiry
    pub fn decode(&self, token: &str) -> Option<Claims> {
        let (payload_b64, signature_b64) = token.split_once('.')?;
        if signature_b64.contains('.') {
            return None;
        }

        // Signature first, then payload; nothing unverified gets parsed
        let mut mac = self.mac();
        mac.update(payload_b64.as_bytes());
        let signature = URL_SAFE_NO_PAD.decode(signature_b64).ok()?;
        mac.verify_slice(&signature).ok()?;

        let payload = URL_SAFE_NO_PAD.decode(payload_b64).ok()?;
        let claims: Claims = serde_json::from_slice(&payload).ok()?;

        // Expiry against the codec's own clock
        if claims.exp <= Utc::now().timestamp() {
            return None;
        }

        Some(claims)
    }

    fn encode(&self, claims: &Claims) -> String {
        let payload = serde_json::to_vec(claims).expect("claims serialize to JSON");
        let payload_b64 = URL_SAFE_NO_PAD.encode(&payload);

        let mut mac = self.mac();
        mac.update(payload_b64.as_bytes());
        let signature_b64 = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        format!("{payload_b64}.{signature_b64}")
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size")
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("secret", &"[REDACTED]")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}
