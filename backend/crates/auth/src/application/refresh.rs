//! Refresh Use Case
//!
//! The two refresh-token operations:
//! - `issue_access_token`: fresh access token, session untouched, the
//!   submitted refresh token stays valid and is passed through.
//! - `rotate`: one-shot consumption of the refresh token. The old
//!   session is deleted FIRST, then a new session/token pair is
//!   created. A crash in between leaves the user re-logging in, never
//!   a replayable token.

use std::sync::Arc;

use kernel::id::{SessionId, UserId};

use crate::application::TokenPair;
use crate::application::config::AuthConfig;
use crate::domain::entity::refresh_session::RefreshSession;
use crate::domain::repository::{RefreshSessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

/// Refresh use case
pub struct RefreshUseCase<U, S>
where
    U: UserRepository,
    S: RefreshSessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> RefreshUseCase<U, S>
where
    U: UserRepository,
    S: RefreshSessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    /// Issue a fresh access token against a live refresh token
    pub async fn issue_access_token(&self, refresh_token: &str) -> AuthResult<TokenPair> {
        let (user_id, _) = self.authorize(refresh_token).await?;

        // The subject user must still exist; a deleted account makes
        // the token as dead as a revoked session would
        let user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        let access_token = self.config.codec().issue_access_token(&user.user_id);

        tracing::debug!(user_id = %user.user_id, "Access token issued");

        Ok(TokenPair {
            user_id: user.user_id,
            access_token,
            refresh_token: refresh_token.to_string(),
        })
    }

    /// Rotate the refresh token: consume the old session, mint a new pair
    pub async fn rotate(&self, refresh_token: &str) -> AuthResult<TokenPair> {
        let (user_id, old_session_id) = self.authorize(refresh_token).await?;

        // Consume before anything else can fail. From here on the
        // submitted token is dead even if the rest of the flow aborts.
        self.session_repo.delete_by_id(old_session_id).await?;

        let user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        let session = RefreshSession::new(user.user_id);
        self.session_repo.create(&session).await?;

        let codec = self.config.codec();
        let access_token = codec.issue_access_token(&user.user_id);
        let new_refresh_token = codec.issue_refresh_token(&user.user_id, &session.session_id);

        tracing::info!(
            user_id = %user.user_id,
            old_session_id = %old_session_id,
            new_session_id = %session.session_id,
            "Refresh token rotated"
        );

        Ok(TokenPair {
            user_id: user.user_id,
            access_token,
            refresh_token: new_refresh_token,
        })
    }

    /// Dual validation: signature/expiry AND a live session row
    async fn authorize(&self, refresh_token: &str) -> AuthResult<(UserId, SessionId)> {
        let codec = self.config.codec();
        if !codec.validate_refresh_token(refresh_token) {
            return Err(AuthError::InvalidToken);
        }

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
