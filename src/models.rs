//! Data model

use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, EnumString};

use crate::utils::password_utils::PWHash;

/// Primary key of a user
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Display,
)]
#[serde(transparent)]
pub struct UserPk(pub u64);

/// Primary key of an artist
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Display,
)]
#[serde(transparent)]
pub struct ArtistPk(pub u64);

/// Primary key of a venue
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Display,
)]
#[serde(transparent)]
pub struct VenuePk(pub u64);

/// Primary key of a show
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Display,
)]
#[serde(transparent)]
pub struct ShowPk(pub u64);

/// Primary key of a note
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Display,
)]
#[serde(transparent)]
pub struct NotePk(pub u64);

/// A registered user. Email is stored lowercased.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Display)]
#[display("{username}")]
pub struct User {
    pub pk: UserPk,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: PWHash,
}

/// A user about to be created
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: PWHash,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Display)]
#[display("{name}")]
pub struct Artist {
    pub pk: ArtistPk,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Display)]
#[display("{name} ({city})")]
pub struct Venue {
    pub pk: VenuePk,
    pub name: String,
    pub city: String,
}

/// An artist playing at a venue
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Show {
    pub pk: ShowPk,
    pub artist: ArtistPk,
    pub venue: VenuePk,
}

/// How much the author enjoyed the show
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumString, Display,
)]
#[strum(ascii_case_insensitive)]
pub enum Rating {
    Terrible,
    Bad,
    Okay,
    Good,
    Great,
}

/// A note left by a user about a show
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Display)]
#[display("{title}")]
pub struct Note {
    pub pk: NotePk,
    pub user: UserPk,
    pub show: ShowPk,
    pub title: String,
    pub text: String,
    pub rating: Option<Rating>,
}

/// The cleaned content of a note form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub text: String,
    pub rating: Option<Rating>,
}

/// Optional public information about a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub user: UserPk,
    pub twitter_username: Option<String>,
    pub bio: Option<String>,
    pub favorite_artist: Option<ArtistPk>,
    pub favorite_show: Option<ShowPk>,
}

impl Profile {
    pub fn new(user: UserPk) -> Self {
        Self {
            user,
            twitter_username: None,
            bio: None,
            favorite_artist: None,
            favorite_show: None,
        }
    }

    pub fn apply(&mut self, update: ProfileUpdate) {
        let ProfileUpdate {
            twitter_username,
            bio,
            favorite_artist,
            favorite_show,
        } = update;
        self.twitter_username = twitter_username;
        self.bio = bio;
        self.favorite_artist = favorite_artist;
        self.favorite_show = favorite_show;
    }
}

/// The cleaned content of a profile form. Every field replaces the stored one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub twitter_username: Option<String>,
    pub bio: Option<String>,
    pub favorite_artist: Option<ArtistPk>,
    pub favorite_show: Option<ShowPk>,
}
