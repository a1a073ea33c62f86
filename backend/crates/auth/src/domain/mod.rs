//! Domain Layer
//!
//! Contains entities, value objects, repository traits and the token codec.

pub mod entity;
pub mod repository;
pub mod token;
pub mod value_object;

// Re-exports
pub use entity::{refresh_session::RefreshSession, user::User};
pub use repository::{RefreshSessionRepository, UserRepository};
pub use token::{Claims, TokenCodec, TokenKind};
