//! Sign Up Use Case
//!
//! Creates a new user account and signs it in immediately.

use std::sync::Arc;

use crate::application::TokenPair;
use crate::application::config::AuthConfig;
use crate::domain::entity::{refresh_session::RefreshSession, user::User};
use crate::domain::repository::{RefreshSessionRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::{AuthError, AuthResult};
use platform::password::ClearTextPassword;

/// Sign up input
pub struct SignUpInput {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

/// Sign up use case
pub struct SignUpUseCase<U, S>
where
    U: UserRepository,
    S: RefreshSessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> SignUpUseCase<U, S>
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

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<TokenPair> {
        let user_name =
            UserName::new(input.user_name).map_err(|e| AuthError::Validation(e.to_string()))?;
        let email = Email::new(input.email).map_err(|e| AuthError::Validation(e.to_string()))?;

        if self.user_repo.exists_by_user_name(&user_name).await? {
            return Err(AuthError::UserNameTaken);
        }

        let password =
            ClearTextPassword::new(input.password).map_err(|e| AuthError::Validation(e.to_string()))?;
        let password_hash = password
            .hash(self.config.pepper())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let user = User::new(user_name, email, password_hash);
        self.user_repo.create(&user).await?;

        let session = RefreshSession::new(user.user_id);
        self.session_repo.create(&session).await?;

        let codec = self.config.codec();
        let access_token = codec.issue_access_token(&user.user_id);
        let refresh_token = codec.issue_refresh_token(&user.user_id, &session.session_id);

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User signed up"
        );

        Ok(TokenPair {
            user_id: user.user_id,
            access_token,
            refresh_token,
        })
    }
}
