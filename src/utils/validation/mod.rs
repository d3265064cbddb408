//! Root module for the validation system.
//! Exposes the public API for input validation.

mod constants;
mod errors;
mod password;
mod types;

// Re-export commonly used types and functions
pub use constants::*;
pub use errors::{FieldError, FormErrors, NON_FIELD_ERRORS};
pub use password::{password_validation, PasswordWeakness};
pub use types::{normalize_username, EmailInput, TextInput, UsernameInput};
