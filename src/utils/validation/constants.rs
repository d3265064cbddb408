//! Constants used throughout the validation system

/// Maximum length of a note title
pub const MAX_TITLE_LENGTH: usize = 200;
/// Maximum length of a note body
pub const MAX_NOTE_TEXT_LENGTH: usize = 1_000;
/// Maximum length of a username, first name or last name
pub const MAX_NAME_LENGTH: usize = 150;
/// Maximum length of an email address
pub const MAX_EMAIL_LENGTH: usize = 254;
/// Maximum length of a twitter handle, without the leading `@`
pub const MAX_TWITTER_USERNAME_LENGTH: usize = 15;
/// Minimum length of a password
pub const MIN_PASSWORD_LENGTH: usize = 8;
