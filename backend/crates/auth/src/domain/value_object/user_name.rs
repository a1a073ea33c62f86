//! User Name Value Object

use derive_more::Display;
use thiserror::Error;

/// Minimum user name length
pub const MIN_USER_NAME_LENGTH: usize = 3;

/// Maximum user name length
pub const MAX_USER_NAME_LENGTH: usize = 32;

/// User name validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    #[error("User name must be at least {MIN_USER_NAME_LENGTH} characters")]
    TooShort,

    #[error("User name must be at most {MAX_USER_NAME_LENGTH} characters")]
    TooLong,

    #[error("User name may only contain letters, digits, '_', '-' and '.'")]
    InvalidCharacter,

    #[error("User name must start with a letter or digit")]
    InvalidFirstCharacter,
}

/// User name (unique, for login and display)
///
/// Stores the name as entered plus a canonical form (lowercased)
/// used for uniqueness checks and lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{original}")]
pub struct UserName {
    original: String,
    canonical: String,
}

impl UserName {
    /// Create a validated user name
    pub fn new(raw: impl Into<String>) -> Result<Self, UserNameError> {
        let original = raw.into().trim().to_string();

        let char_count = original.chars().count();
        if char_count < MIN_USER_NAME_LENGTH {
            return Err(UserNameError::TooShort);
        }
        if char_count > MAX_USER_NAME_LENGTH {
            return Err(UserNameError::TooLong);
        }

        let mut chars = original.chars();
        // Length check above guarantees at least one char
        if let Some(first) = chars.next() {
            if !first.is_ascii_alphanumeric() {
                return Err(UserNameError::InvalidFirstCharacter);
            }
        }
        for ch in original.chars() {
            if !ch.is_ascii_alphanumeric() && !matches!(ch, '_' | '-' | '.') {
                return Err(UserNameError::InvalidCharacter);
            }
        }

        let canonical = original.to_ascii_lowercase();

        Ok(Self {
            original,
            canonical,
        })
    }

    /// The name as entered by the user
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Lowercased form used for uniqueness and lookups
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Alias for `original`
    pub fn as_str(&self) -> &str {
        &self.original
    }
}
