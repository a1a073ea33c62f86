//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{SessionId, UserId};

use crate::domain::entity::{refresh_session::RefreshSession, user::User};
use crate::domain::value_object::user_name::UserName;
use crate::error::AuthResult;

/// User repository trait (the external user store)
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by user name (canonical form)
    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>>;

    /// Check if user name exists
    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool>;
}

/// Refresh session repository trait
///
/// No update operation by design: sessions are immutable once created,
/// rotation always creates a new row and deletes the old one.
#[trait_variant::make(RefreshSessionRepository: Send)]
pub trait LocalRefreshSessionRepository {
    /// Persist a new session
    async fn create(&self, session: &RefreshSession) -> AuthResult<()>;

    /// Check whether a session is still live
    async fn exists(&self, session_id: SessionId) -> AuthResult<bool>;

    /// Delete one session. Idempotent; absent IDs are not an error.
    async fn delete_by_id(&self, session_id: SessionId) -> AuthResult<()>;

    /// Delete every session owned by a user. Idempotent.
    ///
    /// Returns the number of sessions removed.
    async fn delete_all_by_owner(&self, user_id: &UserId) -> AuthResult<u64>;
}
