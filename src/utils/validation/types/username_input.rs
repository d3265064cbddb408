//! Wrapper type for a username that has been validated.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use unicode_normalization::UnicodeNormalization;

use crate::utils::validation::{FieldError, MAX_NAME_LENGTH};

// Letters, digits and @/./+/-/_ only
static USERNAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.@+-]+$").expect("Failed to compile username regex"));

/// Trims `username` and folds compatibility characters with NFKC. Applied both
/// when a username is registered and when one is looked up.
pub fn normalize_username(username: &str) -> String {
    username.trim().nfkc().collect()
}

/// A username as it will be stored. Compatibility characters are folded with
/// NFKC so that visually identical names cannot be registered twice.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UsernameInput(String);

impl UsernameInput {
    pub fn new(username: &str) -> Result<Self, FieldError> {
        let normalized = normalize_username(username);

        if normalized.is_empty() {
            return Err(FieldError::Required);
        }

        let actual = normalized.chars().count();
        if actual > MAX_NAME_LENGTH {
            return Err(FieldError::TooLong {
                max: MAX_NAME_LENGTH,
                actual,
            });
        }

        if !USERNAME_REGEX.is_match(&normalized) {
            return Err(FieldError::InvalidUsername);
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UsernameInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for UsernameInput {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
