//! Represents all possible validation failures of a submitted form.
//!
//! A failure is always attached to the field that caused it. Failures that
//! concern the form as a whole (bad credentials) are stored under
//! [`NON_FIELD_ERRORS`].

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use super::PasswordWeakness;

/// Key under which errors that do not belong to a single field are stored
pub const NON_FIELD_ERRORS: &str = "__all__";

/// Reason why a single field was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("This field is required.")]
    Required,

    #[error("Ensure this value has at most {max} characters (it has {actual}).")]
    TooLong { max: usize, actual: usize },

    #[error("The two password fields didn't match.")]
    PasswordMismatch,

    #[error("A user with that {0} already exists.")]
    AlreadyExists(&'static str),

    #[error("Enter a valid email address.")]
    InvalidEmail,

    #[error("Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.")]
    InvalidUsername,

    #[error("Select a valid choice. {0} is not one of the available choices.")]
    InvalidChoice(String),

    #[error("{0}")]
    WeakPassword(PasswordWeakness),

    #[error("Please enter a correct username and password.")]
    InvalidCredentials,
}

/// Field name to failure reasons, in field name order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: BTreeMap<&'static str, Vec<FieldError>>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure for `field`
    pub fn add(&mut self, field: &'static str, error: FieldError) {
        self.errors.entry(field).or_default().push(error);
    }

    /// Keeps the value of a successful field validation, or records its failure.
    pub fn capture<T>(&mut self, field: &'static str, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.add(field, error);
                None
            }
        }
    }

    /// Returns the failures recorded for `field`, empty if it passed
    pub fn get(&self, field: &str) -> &[FieldError] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains(&self, field: &str, error: &FieldError) -> bool {
        self.get(field).contains(error)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.errors.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldError)> + '_ {
        self.errors
            .iter()
            .flat_map(|(field, errors)| errors.iter().map(move |error| (*field, error)))
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (field, error)) in self.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{field}: {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_records_failures() {
        let mut errors = FormErrors::new();

        assert_eq!(errors.capture("title", Ok::<_, FieldError>(3)), Some(3));
        assert!(errors.is_empty());

        assert_eq!(errors.capture::<()>("text", Err(FieldError::Required)), None);
        assert!(errors.contains("text", &FieldError::Required));
        assert!(!errors.has_field("title"));
    }

    #[test]
    fn test_errors_are_grouped_per_field() {
        let mut errors = FormErrors::new();
        errors.add("username", FieldError::InvalidUsername);
        errors.add("email", FieldError::InvalidEmail);
        errors.add("username", FieldError::AlreadyExists("username"));

        assert_eq!(errors.get("username").len(), 2);
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["email", "username"]);
        assert!(errors.get("password1").is_empty());
    }

    #[test]
    fn test_display() {
        let mut errors = FormErrors::new();
        errors.add("title", FieldError::TooLong { max: 200, actual: 201 });
        errors.add("text", FieldError::Required);

        assert_eq!(
            errors.to_string(),
            "text: This field is required.\n\
             title: Ensure this value has at most 200 characters (it has 201)."
        );
    }
}
