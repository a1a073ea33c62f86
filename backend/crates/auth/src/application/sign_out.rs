//! Sign Out Use Case
//!
//! Revokes refresh sessions: one (logout) or every session the
//! token's subject user owns (logout-all).

use std::sync::Arc;

use kernel::id::{SessionId, UserId};

use crate::application::config::AuthConfig;
use crate::domain::repository::RefreshSessionRepository;
use crate::error::{AuthError, AuthResult};

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: RefreshSessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> SignOutUseCase<S>
where
    S: RefreshSessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Sign out the one session the refresh token is bound to
    ///
    /// Safe to retry: the delete is idempotent and a second call fails
    /// the session-existence check like any other revoked token.
    pub async fn execute(&self, refresh_token: &str) -> AuthResult<()> {
        let (_, session_id) = self.authorize(refresh_token).await?;

        self.session_repo.delete_by_id(session_id).await?;

        tracing::info!(session_id = %session_id, "User signed out");
        Ok(())
    }

    /// Sign out every session of the token's subject user
    ///
    /// Returns the number of sessions revoked. Sessions of other users
    /// are untouched.
    pub async fn execute_all(&self, refresh_token: &str) -> AuthResult<u64> {
        let (user_id, _) = self.authorize(refresh_token).await?;

        let deleted = self.session_repo.delete_all_by_owner(&user_id).await?;

        tracing::info!(
            user_id = %user_id,
            deleted = deleted,
            "User signed out from all sessions"
        );
        Ok(deleted)
    }

    /// Dual validation: signature/expiry AND a live session row
    async fn authorize(&self, refresh_token: &str) -> AuthResult<(UserId, SessionId)> {
        let codec = self.config.codec();
        if !codec.validate_refresh_token(refresh_token) {
            return Err(AuthError::InvalidToken);
        }

        // Claims are extractable once validation succeeded
        let session_id = codec
            .session_id_of(refresh_token)
            .ok_or(AuthError::InvalidToken)?;
        let user_id = codec
            .user_id_of(refresh_token)
            .ok_or(AuthError::InvalidToken)?;

        if !self.session_repo.exists(session_id).await? {
            return Err(AuthError::InvalidToken);
        }

        Ok((user_id, session_id))
    }
}
