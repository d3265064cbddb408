//! Forms turning submitted field values into validated records.
//!
//! Every form reads a [`FormData`] map and either produces a cleaned value or
//! the full set of field errors. A field that is absent and a field submitted
//! empty are the same thing.

mod login;
mod note;
mod profile;
mod registration;

use argon2::password_hash::Error as HashError;
use std::collections::HashMap;
use thiserror::Error;

use crate::database::DBError;
use crate::utils::validation::FormErrors;

pub use login::LoginForm;
pub use note::NewNoteForm;
pub use profile::UserProfileForm;
pub use registration::{Registration, UserRegistrationForm};

/// Raw submitted fields, by name
pub type FormData = HashMap<String, String>;

/// Builds a [`FormData`] from name/value pairs
pub fn form_data<I, K, V>(pairs: I) -> FormData
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(name, value)| (name.into(), value.into()))
        .collect()
}

/// Submitted value of `name`, empty when the field is absent
fn field<'a>(data: &'a FormData, name: &str) -> &'a str {
    data.get(name).map(String::as_str).unwrap_or_default()
}

/// Why a form could not be saved
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("{0}")]
    Invalid(#[from] FormErrors),

    #[error(transparent)]
    Database(#[from] DBError),

    #[error("Password hashing failed: {0}")]
    Hash(HashError),
}

impl From<HashError> for SaveError {
    fn from(error: HashError) -> Self {
        Self::Hash(error)
    }
}
