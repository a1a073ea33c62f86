//! Email Value Object

use derive_more::Display;
use thiserror::Error;

/// Maximum total email length (RFC 5321)
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Email validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("Email address is not in a valid format")]
    InvalidFormat,

    #[error("Email address must be at most {MAX_EMAIL_LENGTH} characters")]
    TooLong,
}

/// Email address
///
/// Intentionally lenient validation: one '@', non-empty local part,
/// domain with at least one dot. Deliverability is not our problem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{_0}")]
pub struct Email(String);

impl Email {
    /// Create a validated email address (lowercased)
    pub fn new(raw: impl Into<String>) -> Result<Self, EmailError> {
        let value = raw.into().trim().to_ascii_lowercase();

        if value.len() > MAX_EMAIL_LENGTH {
            return Err(EmailError::TooLong);
        }

        let (local, domain) = value.split_once('@').ok_or(EmailError::InvalidFormat)?;
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(EmailError::InvalidFormat);
        }
        if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            return Err(EmailError::InvalidFormat);
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
