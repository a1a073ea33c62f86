//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    RefreshUseCase, SignInInput, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::repository::{RefreshSessionRepository, UserRepository};
use crate::error::AuthResult;
use crate::presentation::dto::{LoginRequest, SignUpRequest, TokenRequest, TokenResponse};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + RefreshSessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// POST /api/auth/signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<Json<TokenResponse>>
where
    R: UserRepository + RefreshSessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let pair = use_case
        .execute(SignUpInput {
            user_name: req.user_name,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(pair.into()))
}

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<TokenResponse>>
where
    R: UserRepository + RefreshSessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let pair = use_case
        .execute(SignInInput {
            user_name: req.user_name,
            password: req.password,
        })
        .await?;

    Ok(Json(pair.into()))
}

/// POST /api/auth/logout
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<TokenRequest>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + RefreshSessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
    use_case.execute(&req.refresh_token).await?;

    Ok(StatusCode::OK)
}

/// POST /api/auth/logout-all
pub async fn logout_all<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<TokenRequest>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + RefreshSessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
    use_case.execute_all(&req.refresh_token).await?;

    Ok(StatusCode::OK)
}

/// POST /api/auth/access-token
///
/// Fresh access token; the submitted refresh token stays valid and is
/// echoed back unchanged.
pub async fn access_token<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<TokenRequest>,
) -> AuthResult<Json<TokenResponse>>
where
    R: UserRepository + RefreshSessionRepository + Clone + Send + Sync + 'static,
{
    let use_case =
        RefreshUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let pair = use_case.issue_access_token(&req.refresh_token).await?;

    Ok(Json(pair.into()))
}

/// POST /api/auth/refresh-token
///
/// One-shot rotation: the submitted refresh token is consumed and a
/// new access + refresh pair is returned.
pub async fn refresh_token<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<TokenRequest>,
) -> AuthResult<Json<TokenResponse>>
where
    R: UserRepository + RefreshSessionRepository + Clone + Send + Sync + 'static,
{
    let use_case =
        RefreshUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let pair = use_case.rotate(&req.refresh_token).await?;

    Ok(Json(pair.into()))
}
