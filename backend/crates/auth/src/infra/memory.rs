//! In-Memory Repository Implementation
//!
//! HashMap-backed repository for tests and local development. Same
//! per-call atomicity as the PostgreSQL implementation; no
//! cross-call transactions, matching the store contract.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use kernel::id::{SessionId, UserId};
use uuid::Uuid;

use crate::domain::entity::{refresh_session::RefreshSession, user::User};
use crate::domain::repository::{RefreshSessionRepository, UserRepository};
use crate::domain::value_object::user_name::UserName;
use crate::error::{AuthError, AuthResult};

/// In-memory auth repository
#[derive(Clone, Default)]
pub struct MemoryAuthRepository {
    users: Arc<Mutex<HashMap<Uuid, User>>>,
    sessions: Arc<Mutex<HashMap<Uuid, RefreshSession>>>,
}

impl MemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn users(&self) -> AuthResult<MutexGuard<'_, HashMap<Uuid, User>>> {
        self.users
            .lock()
            .map_err(|_| AuthError::Internal("User store lock poisoned".to_string()))
    }

    fn sessions(&self) -> AuthResult<MutexGuard<'_, HashMap<Uuid, RefreshSession>>> {
        self.sessions
            .lock()
            .map_err(|_| AuthError::Internal("Session store lock poisoned".to_string()))
    }
}

impl UserRepository for MemoryAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        self.users()?
            .insert(*user.user_id.as_uuid(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.users()?.get(user_id.as_uuid()).cloned())
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        Ok(self
            .users()?
            .values()
            .find(|u| u.user_name.canonical() == user_name.canonical())
            .cloned())
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        Ok(self
            .users()?
            .values()
            .any(|u| u.user_name.canonical() == user_name.canonical()))
    }
}

impl RefreshSessionRepository for MemoryAuthRepository {
    async fn create(&self, session: &RefreshSession) -> AuthResult<()> {
        self.sessions()?
            .insert(*session.session_id.as_uuid(), session.clone());
        Ok(())
    }

    async fn exists(&self, session_id: SessionId) -> AuthResult<bool> {
        Ok(self.sessions()?.contains_key(session_id.as_uuid()))
    }

    async fn delete_by_id(&self, session_id: SessionId) -> AuthResult<()> {
        self.sessions()?.remove(session_id.as_uuid());
        Ok(())
    }

    async fn delete_all_by_owner(&self, user_id: &UserId) -> AuthResult<u64> {
        let mut sessions = self.sessions()?;
        let before = sessions.len();
        sessions.retain(|_, s| s.owner_user_id != *user_id);
        Ok((before - sessions.len()) as u64)
    }
}
