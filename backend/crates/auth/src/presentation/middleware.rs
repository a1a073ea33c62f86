//! Auth Middleware
//!
//! Bearer access-token guard for protected routes. Access tokens are
//! stateless, so the guard only needs the config (signing key), not a
//! repository.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::id::UserId;
use std::sync::Arc;

use crate::application::config::AuthConfig;

/// Authenticated principal stored in request extensions
#[derive(Clone, Copy, Debug)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that requires a valid `Authorization: Bearer` access token
///
/// On success the [`AuthenticatedUser`] principal is inserted into the
/// request extensions for downstream handlers.
pub async fn require_access_token(
    config: Arc<AuthConfig>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = bearer_token(&req);

    let user_id = token.and_then(|t| config.codec().validate_access_token(t));

    match user_id {
        Some(user_id) => {
            req.extensions_mut().insert(AuthenticatedUser { user_id });
            Ok(next.run(req).await)
        }
        None => Err((StatusCode::UNAUTHORIZED, [("X-Auth-Required", "true")]).into_response()),
    }
}

fn bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Extension, Router, middleware, routing::get};
    use tower::ServiceExt;

    async fn whoami(Extension(user): Extension<AuthenticatedUser>) -> String {
        user.user_id.to_string()
    }

    fn protected_app(config: Arc<AuthConfig>) -> Router {
        Router::new().route("/whoami", get(whoami)).layer(
            middleware::from_fn(move |req, next| require_access_token(config.clone(), req, next)),
        )
    }

    fn get_request(token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/whoami");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn valid_access_token_reaches_the_handler() {
        let config = Arc::new(AuthConfig::with_random_secret());
        let user_id = UserId::new();
        let token = config.codec().issue_access_token(&user_id);

        let response = protected_app(config)
            .oneshot(get_request(Some(&token)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body, user_id.to_string().as_bytes());
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let config = Arc::new(AuthConfig::with_random_secret());

        let response = protected_app(config)
            .oneshot(get_request(None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn refresh_token_is_not_accepted_as_access_token() {
        let config = Arc::new(AuthConfig::with_random_secret());
        let token = config
            .codec()
            .issue_refresh_token(&UserId::new(), &kernel::id::SessionId::new());

        let response = protected_app(config)
            .oneshot(get_request(Some(&token)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
