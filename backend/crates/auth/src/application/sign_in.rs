//! Sign In Use Case
//!
//! Authenticates a user and starts a refresh session.

use std::sync::Arc;

use crate::application::TokenPair;
use crate::application::config::AuthConfig;
use crate::domain::entity::refresh_session::RefreshSession;
use crate::domain::repository::{RefreshSessionRepository, UserRepository};
use crate::domain::value_object::user_name::UserName;
use crate::error::{AuthError, AuthResult};
use platform::password::ClearTextPassword;

/// Sign in input
pub struct SignInInput {
    pub user_name: String,
    pub password: String,
}

/// Sign in use case
pub struct SignInUseCase<U, S>
where
    U: UserRepository,
    S: RefreshSessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> SignInUseCase<U, S>
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

    pub async fn execute(&self, input: SignInInput) -> AuthResult<TokenPair> {
        // Any identity failure and any password failure collapse into
        // InvalidCredentials, so callers cannot probe which usernames exist
        let user_name =
            UserName::new(input.user_name).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_user_name(&user_name)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password =
            ClearTextPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        if !user.password_hash.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        // Credentials are good: bind a fresh session and issue the pair
        let session = RefreshSession::new(user.user_id);
        self.session_repo.create(&session).await?;

        let codec = self.config.codec();
        let access_token = codec.issue_access_token(&user.user_id);
        let refresh_token = codec.issue_refresh_token(&user.user_id, &session.session_id);

        tracing::info!(
            user_id = %user.user_id,
            session_id = %session.session_id,
            "User signed in"
        );

        Ok(TokenPair {
            user_id: user.user_id,
            access_token,
            refresh_token,
        })
    }
}
