//! Refresh Session Entity
//!
//! One live refresh-capable login. The existence of this row is the
//! source of truth for refresh-token validity: deleting it revokes
//! every refresh token that references it, signature or not.
//!
//! Sessions are immutable once created. Rotation never updates a row;
//! it deletes the consumed session and creates a new one.

use chrono::{DateTime, Utc};
use kernel::id::{SessionId, UserId};

/// Refresh session entity
#[derive(Debug, Clone)]
pub struct RefreshSession {
    /// Session ID (UUID v4, random and collision-resistant)
    pub session_id: SessionId,
    /// The user this login belongs to
    pub owner_user_id: UserId,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl RefreshSession {
    /// Create a new refresh session for a user
    pub fn new(owner_user_id: UserId) -> Self {
        Self {
            session_id: SessionId::new(),
            owner_user_id,
            created_at: Utc::now(),
        }
    }
}
