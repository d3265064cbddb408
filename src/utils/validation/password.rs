//! Password strength rules applied at registration.

use derive_more::Display;

use crate::utils::validation::MIN_PASSWORD_LENGTH;

// Passwords guessed first by any dictionary attack
const COMMON_PASSWORDS: &[&str] = &[
    "password",
    "password1",
    "password123",
    "12345678",
    "123456789",
    "1234567890",
    "qwertyuiop",
    "iloveyou",
    "sunshine",
    "princess",
    "football",
    "baseball",
    "welcome1",
    "letmein1",
    "trustno1",
    "abc12345",
    "superman",
    "starwars",
];

/// Why a password was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum PasswordWeakness {
    #[display("This password is too short. It must contain at least 8 characters.")]
    TooShort,
    #[display("This password is entirely numeric.")]
    EntirelyNumeric,
    #[display("This password is too similar to your personal information.")]
    TooSimilar,
    #[display("This password is too common.")]
    TooCommon,
}

/// Checks that `password` is strong enough for an account whose personal
/// information is `attributes` (username, names, email local part).
pub fn password_validation(password: &str, attributes: &[&str]) -> Result<(), PasswordWeakness> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PasswordWeakness::TooShort);
    }

    if password.chars().all(|c| c.is_ascii_digit()) {
        return Err(PasswordWeakness::EntirelyNumeric);
    }

    let lowered = password.to_lowercase();
    if attributes
        .iter()
        .filter(|attribute| !attribute.is_empty())
        .any(|attribute| lowered == attribute.to_lowercase())
    {
        return Err(PasswordWeakness::TooSimilar);
    }

    if COMMON_PASSWORDS.contains(&lowered.as_str()) {
        return Err(PasswordWeakness::TooCommon);
    }

    Ok(())
}
