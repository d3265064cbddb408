//! Represents a validated email address.
//!
//! This module provides a type-safe wrapper around email addresses that ensures
//! they meet standard email format requirements. It uses the validator crate
//! to perform validation according to HTML5 email specifications.

use std::fmt;
use validator::ValidateEmail;

use crate::utils::validation::{FieldError, MAX_EMAIL_LENGTH};

/// A validated email address that is guaranteed to meet format requirements.
/// Addresses are stored lowercased so that two spellings of the same mailbox
/// compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EmailInput {
    // The validated and normalized email address
    email: String,
}

impl EmailInput {
    /// Creates a new `EmailInput` after validating the provided email string.
    ///
    /// The email address is trimmed of whitespace and validated against HTML5
    /// email format requirements.
    ///
    /// # Returns
    /// * `Ok(EmailInput)` if the email is valid
    /// * `Err(FieldError::Required)` if it is blank
    /// * `Err(FieldError::TooLong)` past 254 characters
    /// * `Err(FieldError::InvalidEmail)` otherwise
    pub fn new(email: &str) -> Result<Self, FieldError> {
        let email_trimmed = email.trim();

        if email_trimmed.is_empty() {
            return Err(FieldError::Required);
        }

        let actual = email_trimmed.chars().count();
        if actual > MAX_EMAIL_LENGTH {
            return Err(FieldError::TooLong {
                max: MAX_EMAIL_LENGTH,
                actual,
            });
        }

        if !email_trimmed.validate_email() {
            return Err(FieldError::InvalidEmail);
        }

        Ok(Self {
            email: email_trimmed.to_lowercase(),
        })
    }

    /// Returns a string slice of the validated email address
    pub fn as_str(&self) -> &str {
        &self.email
    }

    /// Returns the part before the `@`
    pub fn local_part(&self) -> &str {
        self.email
            .rsplit_once('@')
            .map_or(self.email.as_str(), |(local, _)| local)
    }
}

impl fmt::Display for EmailInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.email)
    }
}

impl AsRef<str> for EmailInput {
    fn as_ref(&self) -> &str {
        &self.email
    }
}
