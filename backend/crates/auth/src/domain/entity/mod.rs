//! Domain Entities

pub mod refresh_session;
pub mod user;

pub use refresh_session::RefreshSession;
pub use user::User;
