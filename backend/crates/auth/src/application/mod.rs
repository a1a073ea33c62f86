//! Application Layer
//!
//! Use cases and application services. Every successful operation
//! answers with a [`TokenPair`]; failures are `InvalidCredentials` or
//! `InvalidToken` (plus conflict on signup), nothing finer-grained.

pub mod config;
pub mod refresh;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

use kernel::id::UserId;

// Re-exports
pub use config::AuthConfig;
pub use refresh::RefreshUseCase;
pub use sign_in::{SignInInput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpUseCase};

/// Result of every successful auth operation
///
/// For the access-token-only refresh the refresh token is the one the
/// caller submitted, passed through unchanged.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub user_id: UserId,
    pub access_token: String,
    pub refresh_token: String,
}
