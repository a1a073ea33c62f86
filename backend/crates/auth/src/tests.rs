//! Unit tests for the auth crate
//!
//! Exercises the full token lifecycle against the in-memory repository:
//! login/signup, dual validation, revocation, one-shot rotation.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    RefreshUseCase, SignInInput, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
    TokenPair,
};
use crate::domain::repository::RefreshSessionRepository;
use crate::error::AuthError;
use crate::infra::memory::MemoryAuthRepository;

const PASSWORD: &str = "correct horse battery";

struct Harness {
    repo: Arc<MemoryAuthRepository>,
    config: Arc<AuthConfig>,
}

impl Harness {
    fn new() -> Self {
        Self::with_config(AuthConfig::with_random_secret())
    }

    fn with_config(config: AuthConfig) -> Self {
        Self {
            repo: Arc::new(MemoryAuthRepository::new()),
            config: Arc::new(config),
        }
    }

    async fn sign_up(&self, user_name: &str) -> TokenPair {
        SignUpUseCase::new(self.repo.clone(), self.repo.clone(), self.config.clone())
            .execute(SignUpInput {
                user_name: user_name.to_string(),
                email: format!("{user_name}@example.com"),
                password: PASSWORD.to_string(),
            })
            .await
            .expect("signup should succeed")
    }

    async fn login(&self, user_name: &str, password: &str) -> Result<TokenPair, AuthError> {
        SignInUseCase::new(self.repo.clone(), self.repo.clone(), self.config.clone())
            .execute(SignInInput {
                user_name: user_name.to_string(),
                password: password.to_string(),
            })
            .await
    }

    fn sign_out(&self) -> SignOutUseCase<MemoryAuthRepository> {
        SignOutUseCase::new(self.repo.clone(), self.config.clone())
    }

    fn refresh(&self) -> RefreshUseCase<MemoryAuthRepository, MemoryAuthRepository> {
        RefreshUseCase::new(self.repo.clone(), self.repo.clone(), self.config.clone())
    }

    async fn session_exists(&self, refresh_token: &str) -> bool {
        let session_id = self
            .config
            .codec()
            .session_id_of(refresh_token)
            .expect("refresh token should carry a session id");
        self.repo.exists(session_id).await.unwrap()
    }
}

mod login_tests {
    use super::*;

    #[tokio::test]
    async fn login_returns_tokens_bound_to_a_live_session() {
        let h = Harness::new();
        let signup_pair = h.sign_up("alice").await;

        let pair = h.login("alice", PASSWORD).await.unwrap();

        assert_eq!(pair.user_id, signup_pair.user_id);
        assert!(h.session_exists(&pair.refresh_token).await);

        // Round-trip: the claims are the pair that created the session
        let codec = h.config.codec();
        assert_eq!(codec.user_id_of(&pair.refresh_token), Some(pair.user_id));
        assert_eq!(
            codec.validate_access_token(&pair.access_token),
            Some(pair.user_id)
        );
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let h = Harness::new();
        h.sign_up("alice").await;

        let err = h.login("alice", "wrong password!").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_rejects_unknown_user() {
        let h = Harness::new();

        let err = h.login("nobody", PASSWORD).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn each_login_creates_its_own_session() {
        let h = Harness::new();
        h.sign_up("alice").await;

        let first = h.login("alice", PASSWORD).await.unwrap();
        let second = h.login("alice", PASSWORD).await.unwrap();

        assert_ne!(first.refresh_token, second.refresh_token);
        assert!(h.session_exists(&first.refresh_token).await);
        assert!(h.session_exists(&second.refresh_token).await);
    }
}

mod signup_tests {
    use super::*;

    #[tokio::test]
    async fn signup_rejects_taken_user_name() {
        let h = Harness::new();
        h.sign_up("alice").await;

        let err = SignUpUseCase::new(h.repo.clone(), h.repo.clone(), h.config.clone())
            .execute(SignUpInput {
                user_name: "Alice".to_string(), // canonical match
                email: "other@example.com".to_string(),
                password: PASSWORD.to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::UserNameTaken));
    }

    #[tokio::test]
    async fn signup_rejects_weak_password() {
        let h = Harness::new();

        let err = SignUpUseCase::new(h.repo.clone(), h.repo.clone(), h.config.clone())
            .execute(SignUpInput {
                user_name: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password: "short".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Validation(_)));
    }
}

mod logout_tests {
    use super::*;

    #[tokio::test]
    async fn logout_revokes_the_session_and_the_token() {
        let h = Harness::new();
        let pair = h.sign_up("alice").await;

        h.sign_out().execute(&pair.refresh_token).await.unwrap();

        assert!(!h.session_exists(&pair.refresh_token).await);

        // Signature is still valid, but dual validation fails everywhere
        let rt = &pair.refresh_token;
        assert!(matches!(
            h.sign_out().execute(rt).await.unwrap_err(),
            AuthError::InvalidToken
        ));
        assert!(matches!(
            h.sign_out().execute_all(rt).await.unwrap_err(),
            AuthError::InvalidToken
        ));
        assert!(matches!(
            h.refresh().issue_access_token(rt).await.unwrap_err(),
            AuthError::InvalidToken
        ));
        assert!(matches!(
            h.refresh().rotate(rt).await.unwrap_err(),
            AuthError::InvalidToken
        ));
    }

    #[tokio::test]
    async fn logout_only_revokes_its_own_session() {
        let h = Harness::new();
        h.sign_up("alice").await;
        let first = h.login("alice", PASSWORD).await.unwrap();
        let second = h.login("alice", PASSWORD).await.unwrap();

        h.sign_out().execute(&first.refresh_token).await.unwrap();

        assert!(!h.session_exists(&first.refresh_token).await);
        assert!(h.session_exists(&second.refresh_token).await);
    }

    #[tokio::test]
    async fn logout_all_revokes_every_session_of_the_owner_only() {
        let h = Harness::new();
        let alice1 = h.sign_up("alice").await;
        let alice2 = h.login("alice", PASSWORD).await.unwrap();
        let bob = h.sign_up("bob").await;

        let deleted = h.sign_out().execute_all(&alice1.refresh_token).await.unwrap();
        assert_eq!(deleted, 2);

        assert!(!h.session_exists(&alice1.refresh_token).await);
        assert!(!h.session_exists(&alice2.refresh_token).await);
        assert!(h.session_exists(&bob.refresh_token).await);
    }

    #[tokio::test]
    async fn tampered_token_is_rejected_before_touching_the_store() {
        let h = Harness::new();
        let pair = h.sign_up("alice").await;

        let mut tampered = pair.refresh_token.clone().into_bytes();
        let last = tampered.len() - 1;
        tampered[last] ^= 0x01;
        let tampered = String::from_utf8(tampered).unwrap();

        let err = h.sign_out().execute(&tampered).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));

        // The real session is untouched
        assert!(h.session_exists(&pair.refresh_token).await);
    }
}

mod refresh_tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn access_token_refresh_leaves_the_session_alone() {
        let h = Harness::new();
        let pair = h.sign_up("alice").await;

        let refreshed = h
            .refresh()
            .issue_access_token(&pair.refresh_token)
            .await
            .unwrap();

        assert_eq!(refreshed.user_id, pair.user_id);
        // Same refresh token passed through, session still live
        assert_eq!(refreshed.refresh_token, pair.refresh_token);
        assert!(h.session_exists(&pair.refresh_token).await);
        assert_eq!(
            h.config.codec().validate_access_token(&refreshed.access_token),
            Some(pair.user_id)
        );
    }

    #[tokio::test]
    async fn rotation_is_one_shot() {
        let h = Harness::new();
        let pair = h.sign_up("alice").await;
        let rt1 = pair.refresh_token;

        let rotated = h.refresh().rotate(&rt1).await.unwrap();
        let rt2 = rotated.refresh_token;

        assert_eq!(rotated.user_id, pair.user_id);
        assert_ne!(rt1, rt2);
        assert!(!h.session_exists(&rt1).await);
        assert!(h.session_exists(&rt2).await);

        // The consumed token is dead for every operation
        assert!(matches!(
            h.refresh().rotate(&rt1).await.unwrap_err(),
            AuthError::InvalidToken
        ));
        assert!(matches!(
            h.refresh().issue_access_token(&rt1).await.unwrap_err(),
            AuthError::InvalidToken
        ));

        // The rotated token keeps working
        assert!(h.refresh().issue_access_token(&rt2).await.is_ok());
    }

    #[tokio::test]
    async fn expired_refresh_token_fails_even_with_a_live_session() {
        let mut config = AuthConfig::with_random_secret();
        config.refresh_ttl = Duration::seconds(-10);
        let h = Harness::with_config(config);

        let pair = h.sign_up("alice").await;

        let err = h
            .refresh()
            .issue_access_token(&pair.refresh_token)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));

        // The session row is still there; expiry alone killed the token
        let live = h.repo.delete_all_by_owner(&pair.user_id).await.unwrap();
        assert_eq!(live, 1);
    }

    #[tokio::test]
    async fn login_then_rotate_then_replay_scenario() {
        let h = Harness::new();
        h.sign_up("alice").await;

        let (id1, _at1, rt1) = {
            let p = h.login("alice", PASSWORD).await.unwrap();
            (p.user_id, p.access_token, p.refresh_token)
        };

        let rotated = h.refresh().rotate(&rt1).await.unwrap();
        assert_eq!(rotated.user_id, id1);
        assert_ne!(rotated.refresh_token, rt1);

        let err = h.refresh().issue_access_token(&rt1).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }
}
