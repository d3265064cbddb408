use log::debug;

use crate::database::Database;
use crate::forms::{field, FormData};
use crate::models::UserPk;
use crate::utils::password_utils::verify;
use crate::utils::validation::{FieldError, FormErrors, NON_FIELD_ERRORS};

/// Form used to sign in. Usernames are matched whatever their case.
#[derive(Debug)]
pub struct LoginForm<'a> {
    data: &'a FormData,
}

impl<'a> LoginForm<'a> {
    pub const USERNAME: &'static str = "username";
    pub const PASSWORD: &'static str = "password";

    pub fn new(data: &'a FormData) -> Self {
        Self { data }
    }

    /// Returns the user the credentials belong to
    pub fn authenticate(&self, db: &Database) -> Result<UserPk, FormErrors> {
        let mut errors = FormErrors::new();

        let username = field(self.data, Self::USERNAME).trim();
        // Passwords are taken verbatim, spaces included
        let password = field(self.data, Self::PASSWORD);

        if username.is_empty() {
            errors.add(Self::USERNAME, FieldError::Required);
        }
        if password.is_empty() {
            errors.add(Self::PASSWORD, FieldError::Required);
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let user = db.lookup_username(username);
        if !verify(password, user.map(|u| &u.password)) {
            debug!("Login rejected, bad credentials");
            errors.add(NON_FIELD_ERRORS, FieldError::InvalidCredentials);
            return Err(errors);
        }

        user.map(|u| u.pk).ok_or(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::tests::new_user;
    use crate::forms::{form_data, UserRegistrationForm};

    fn db_with_bob() -> (Database, UserPk) {
        let mut db = Database::in_memory();
        let bob = db.create_user(new_user("bob", "bob@bob.com")).unwrap();
        (db, bob)
    }

    #[test]
    fn test_login_username_is_case_insensitive() {
        let (db, bob) = db_with_bob();

        for username in ["bob", "BOB", "Bob", " bOb "] {
            let data = form_data([("username", username), ("password", "q!w$er^ty6ui7op")]);
            assert_eq!(
                LoginForm::new(&data).authenticate(&db),
                Ok(bob),
                "{} should log in as bob",
                username
            );
        }
    }

    #[test]
    fn test_login_username_is_nfkc_normalized() {
        let mut db = Database::in_memory();
        let registration = form_data([
            ("username", "ｂｏｂ"),
            ("email", "bob@bob.com"),
            ("first_name", "bob"),
            ("last_name", "whatever"),
            ("password1", "q!w$er^ty6ui7op"),
            ("password2", "q!w$er^ty6ui7op"),
        ]);
        let bob = UserRegistrationForm::new(&registration).save(&mut db).unwrap();
        assert_eq!(db.get_user(bob).unwrap().username, "bob");

        for username in ["ｂｏｂ", "ＢＯＢ", "bob"] {
            let data = form_data([("username", username), ("password", "q!w$er^ty6ui7op")]);
            assert_eq!(
                LoginForm::new(&data).authenticate(&db),
                Ok(bob),
                "{} should log in as bob",
                username
            );
        }
    }

    #[test]
    fn test_login_with_bad_credentials_fails() {
        let (db, _) = db_with_bob();

        for (username, password) in [("bob", "wrong password"), ("alice", "q!w$er^ty6ui7op")] {
            let data = form_data([("username", username), ("password", password)]);
            let errors = LoginForm::new(&data).authenticate(&db).unwrap_err();
            assert_eq!(errors.get(NON_FIELD_ERRORS), [FieldError::InvalidCredentials]);
        }
    }

    #[test]
    fn test_login_fields_are_required() {
        let (db, _) = db_with_bob();

        let data = FormData::new();
        let errors = LoginForm::new(&data).authenticate(&db).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["password", "username"]);
    }
}
