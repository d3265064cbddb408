use log::debug;
use std::fmt;

use crate::database::Database;
use crate::forms::{field, FormData, SaveError};
use crate::models::{NewUser, UserPk};
use crate::utils::password_utils::hash;
use crate::utils::validation::{
    password_validation, EmailInput, FieldError, FormErrors, TextInput, UsernameInput,
    MAX_NAME_LENGTH,
};

/// Form used to create an account
#[derive(Debug)]
pub struct UserRegistrationForm<'a> {
    data: &'a FormData,
}

/// The cleaned content of a registration form
pub struct Registration {
    pub username: UsernameInput,
    pub email: EmailInput,
    pub first_name: TextInput,
    pub last_name: TextInput,
    password: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password", &"********")
            .finish()
    }
}

impl<'a> UserRegistrationForm<'a> {
    pub const USERNAME: &'static str = "username";
    pub const EMAIL: &'static str = "email";
    pub const FIRST_NAME: &'static str = "first_name";
    pub const LAST_NAME: &'static str = "last_name";
    pub const PASSWORD1: &'static str = "password1";
    pub const PASSWORD2: &'static str = "password2";

    pub fn new(data: &'a FormData) -> Self {
        Self { data }
    }

    /// Validates every field, then checks that neither the username nor the
    /// email is already used by a stored user, whatever its case.
    pub fn clean(&self, db: &Database) -> Result<Registration, FormErrors> {
        let mut errors = FormErrors::new();

        let username = errors
            .capture(Self::USERNAME, UsernameInput::new(field(self.data, Self::USERNAME)))
            .filter(|username| {
                let taken = db.username_taken(username.as_str());
                if taken {
                    errors.add(Self::USERNAME, FieldError::AlreadyExists("username"));
                }
                !taken
            });

        let email = errors
            .capture(Self::EMAIL, EmailInput::new(field(self.data, Self::EMAIL)))
            .filter(|email| {
                let taken = db.email_taken(email.as_str());
                if taken {
                    errors.add(Self::EMAIL, FieldError::AlreadyExists("email"));
                }
                !taken
            });

        let first_name = errors.capture(
            Self::FIRST_NAME,
            TextInput::new(field(self.data, Self::FIRST_NAME), MAX_NAME_LENGTH),
        );
        let last_name = errors.capture(
            Self::LAST_NAME,
            TextInput::new(field(self.data, Self::LAST_NAME), MAX_NAME_LENGTH),
        );

        let password = self.clean_password(
            &mut errors,
            &[
                username.as_ref().map_or("", UsernameInput::as_str),
                first_name.as_ref().map_or("", TextInput::as_str),
                last_name.as_ref().map_or("", TextInput::as_str),
                email.as_ref().map_or("", EmailInput::local_part),
            ],
        );

        match (username, email, first_name, last_name, password) {
            (Some(username), Some(email), Some(first_name), Some(last_name), Some(password))
                if errors.is_empty() =>
            {
                Ok(Registration {
                    username,
                    email,
                    first_name,
                    last_name,
                    password: password.to_owned(),
                })
            }
            _ => {
                debug!(
                    "Registration rejected, invalid fields: {:?}",
                    errors.fields().collect::<Vec<_>>()
                );
                Err(errors)
            }
        }
    }

    /// Both password fields are required and must match exactly. Strength is
    /// only judged once they match, and reported on the confirmation field.
    fn clean_password(&self, errors: &mut FormErrors, attributes: &[&str]) -> Option<&'a str> {
        let password1 = field(self.data, Self::PASSWORD1);
        let password2 = field(self.data, Self::PASSWORD2);

        if password1.is_empty() {
            errors.add(Self::PASSWORD1, FieldError::Required);
        }
        if password2.is_empty() {
            errors.add(Self::PASSWORD2, FieldError::Required);
        }
        if password1.is_empty() || password2.is_empty() {
            return None;
        }

        if password1 != password2 {
            errors.add(Self::PASSWORD2, FieldError::PasswordMismatch);
            return None;
        }

        errors.capture(
            Self::PASSWORD2,
            password_validation(password2, attributes)
                .map(|()| password2)
                .map_err(FieldError::WeakPassword),
        )
    }

    pub fn is_valid(&self, db: &Database) -> bool {
        self.clean(db).is_ok()
    }

    /// Validates then creates the user with a hashed password
    pub fn save(&self, db: &mut Database) -> Result<UserPk, SaveError> {
        let Registration {
            username,
            email,
            first_name,
            last_name,
            password,
        } = self.clean(db)?;

        let new_user = NewUser {
            username: username.as_str().to_owned(),
            email: email.as_str().to_owned(),
            first_name: first_name.into_string(),
            last_name: last_name.into_string(),
            password: hash(&password)?,
        };

        Ok(db.create_user(new_user)?)
    }
}
