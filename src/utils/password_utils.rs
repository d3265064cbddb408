//! Password hashing and verification

use argon2::{
    password_hash::{
        rand_core::OsRng, Error as HashError, PasswordHashString, PasswordVerifier, SaltString,
    },
    Argon2, PasswordHasher,
};
use derive_more::derive::Display;
use serde::{Deserialize, Serialize};
use std::{str::FromStr, sync::LazyLock};

static DEFAULT_HASHER: LazyLock<Argon2<'static>> = LazyLock::new(Argon2::default);

/// Hash of the empty password, checked when the user does not exist so that an
/// unknown username takes as long to reject as a wrong password
static EMPTY_HASH: LazyLock<Option<PWHash>> = LazyLock::new(|| hash("").ok());

/// A hashed password in PHC string format
#[derive(Clone, Debug, Display)]
pub struct PWHash(PasswordHashString);

impl PartialEq for PWHash {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_str() == other.0.as_str()
    }
}

impl Eq for PWHash {}

impl Serialize for PWHash {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.as_str().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PWHash {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let hash = PasswordHashString::from_str(&s)
            .map_err(|_| <D::Error as serde::de::Error>::custom("Invalid PHC string"))?;
        Ok(PWHash(hash))
    }
}

/// Hashes a clear-text password with Argon2id and a random salt
pub fn hash(password: &str) -> Result<PWHash, HashError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = DEFAULT_HASHER
        .hash_password(password.as_bytes(), &salt)?
        .serialize();

    Ok(PWHash(hash))
}

/// Checks `password` against the stored hash.
///
/// Without a hash the password is still checked against a dummy one, so the
/// caller cannot tell "no such user" from "wrong password" by timing.
pub fn verify(password: &str, maybe_hash: Option<&PWHash>) -> bool {
    let Some(hash) = maybe_hash.or(EMPTY_HASH.as_ref()) else {
        return false;
    };

    let verified = DEFAULT_HASHER
        .verify_password(password.as_bytes(), &hash.0.password_hash())
        .is_ok();

    verified && maybe_hash.is_some()
}
