pub mod password_utils;
pub mod validation;
