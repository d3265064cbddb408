//! Provides a validated free-text field representation.
//!
//! Submitted text is trimmed of surrounding whitespace before any check, so a
//! value made only of spaces, tabs or newlines counts as missing. Length limits
//! are counted in characters, not bytes.

use std::fmt;

use crate::utils::validation::FieldError;

/// Represents validated, trimmed textual content.
/// This type can only be constructed through validation, ensuring that any
/// instance is non-blank and within its length limit.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextInput {
    // The trimmed text content
    text_content: String,
}

impl TextInput {
    /// Validates a required field limited to `max_length` characters.
    ///
    /// # Example
    /// ```
    /// use lmn::utils::validation::{FieldError, TextInput};
    ///
    /// let title = TextInput::new("  Encore!  ", 200).unwrap();
    /// assert_eq!(title.as_str(), "Encore!");
    /// assert_eq!(TextInput::new(" \t\n", 200), Err(FieldError::Required));
    /// ```
    pub fn new(content: &str, max_length: usize) -> Result<Self, FieldError> {
        Self::optional(content, max_length)?.ok_or(FieldError::Required)
    }

    /// Validates an optional field limited to `max_length` characters.
    /// Blank content yields `None`.
    pub fn optional(content: &str, max_length: usize) -> Result<Option<Self>, FieldError> {
        let trimmed = content.trim();

        if trimmed.is_empty() {
            return Ok(None);
        }

        let actual = trimmed.chars().count();
        if actual > max_length {
            return Err(FieldError::TooLong {
                max: max_length,
                actual,
            });
        }

        Ok(Some(Self {
            text_content: trimmed.to_owned(),
        }))
    }

    /// Validates an optional field without a length limit
    pub fn optional_unbounded(content: &str) -> Option<Self> {
        let trimmed = content.trim();
        (!trimmed.is_empty()).then(|| Self {
            text_content: trimmed.to_owned(),
        })
    }

    /// Returns the validated content as a string slice
    pub fn as_str(&self) -> &str {
        &self.text_content
    }

    pub fn into_string(self) -> String {
        self.text_content
    }
}

impl fmt::Display for TextInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text_content)
    }
}

impl AsRef<str> for TextInput {
    fn as_ref(&self) -> &str {
        &self.text_content
    }
}
