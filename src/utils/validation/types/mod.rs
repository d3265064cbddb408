//! Type definitions for the validation system

mod email_input;
mod text_input;
mod username_input;

// Re-export commonly used types and functions
pub use email_input::EmailInput;
pub use text_input::TextInput;
pub use username_input::{normalize_username, UsernameInput};
