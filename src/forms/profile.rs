use log::debug;

use crate::database::Database;
use crate::forms::{field, FormData, SaveError};
use crate::models::{ArtistPk, ProfileUpdate, ShowPk, UserPk};
use crate::utils::validation::{FieldError, FormErrors, TextInput, MAX_TWITTER_USERNAME_LENGTH};

/// Form used to edit a user's profile. Every field is optional.
#[derive(Debug)]
pub struct UserProfileForm<'a> {
    data: &'a FormData,
}

impl<'a> UserProfileForm<'a> {
    pub const TWITTER_USERNAME: &'static str = "twitter_username";
    pub const BIO: &'static str = "bio";
    pub const FAVORITE_ARTIST: &'static str = "favorite_artist";
    pub const FAVORITE_SHOW: &'static str = "favorite_show";

    pub fn new(data: &'a FormData) -> Self {
        Self { data }
    }

    pub fn clean(&self, db: &Database) -> Result<ProfileUpdate, FormErrors> {
        let mut errors = FormErrors::new();

        // A leading @ is not part of the handle
        let raw_handle = field(self.data, Self::TWITTER_USERNAME).trim();
        let handle = raw_handle.strip_prefix('@').unwrap_or(raw_handle);
        let twitter_username = errors.capture(
            Self::TWITTER_USERNAME,
            TextInput::optional(handle, MAX_TWITTER_USERNAME_LENGTH),
        );

        let bio = TextInput::optional_unbounded(field(self.data, Self::BIO));

        let favorite_artist = errors.capture(
            Self::FAVORITE_ARTIST,
            clean_reference(field(self.data, Self::FAVORITE_ARTIST), |pk| {
                db.get_artist(ArtistPk(pk)).ok().map(|artist| artist.pk)
            }),
        );
        let favorite_show = errors.capture(
            Self::FAVORITE_SHOW,
            clean_reference(field(self.data, Self::FAVORITE_SHOW), |pk| {
                db.get_show(ShowPk(pk)).ok().map(|show| show.pk)
            }),
        );

        match (twitter_username, favorite_artist, favorite_show) {
            (Some(twitter_username), Some(favorite_artist), Some(favorite_show))
                if errors.is_empty() =>
            {
                Ok(ProfileUpdate {
                    twitter_username: twitter_username.map(TextInput::into_string),
                    bio: bio.map(TextInput::into_string),
                    favorite_artist,
                    favorite_show,
                })
            }
            _ => {
                debug!(
                    "Profile rejected, invalid fields: {:?}",
                    errors.fields().collect::<Vec<_>>()
                );
                Err(errors)
            }
        }
    }

    pub fn is_valid(&self, db: &Database) -> bool {
        self.clean(db).is_ok()
    }

    /// Validates then replaces the profile of `user`
    pub fn save(&self, db: &mut Database, user: UserPk) -> Result<(), SaveError> {
        let update = self.clean(db)?;
        Ok(db.update_profile(user, update)?)
    }
}

/// Resolves an optional primary key. Blank means no reference; anything that
/// is not the key of an existing row is an invalid choice.
fn clean_reference<T>(
    raw: &str,
    lookup: impl FnOnce(u64) -> Option<T>,
) -> Result<Option<T>, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    trimmed
        .parse::<u64>()
        .ok()
        .and_then(lookup)
        .map(Some)
        .ok_or_else(|| FieldError::InvalidChoice(trimmed.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::tests::new_user;
    use crate::forms::form_data;

    #[test]
    fn test_empty_profile_is_valid() {
        let db = Database::in_memory();

        let data = FormData::new();
        assert_eq!(UserProfileForm::new(&data).clean(&db), Ok(ProfileUpdate::default()));

        let data = form_data([
            ("twitter_username", ""),
            ("bio", "  "),
            ("favorite_artist", ""),
            ("favorite_show", ""),
        ]);
        assert_eq!(UserProfileForm::new(&data).clean(&db), Ok(ProfileUpdate::default()));
    }

    #[test]
    fn test_twitter_username_length() {
        let db = Database::in_memory();

        let data = form_data([("twitter_username", "a".repeat(15))]);
        assert!(UserProfileForm::new(&data).is_valid(&db));

        let data = form_data([("twitter_username", "a".repeat(16))]);
        let errors = UserProfileForm::new(&data).clean(&db).unwrap_err();
        assert_eq!(
            errors.get("twitter_username"),
            [FieldError::TooLong { max: 15, actual: 16 }]
        );
    }

    #[test]
    fn test_twitter_username_leading_at_is_dropped() {
        let db = Database::in_memory();

        let data = form_data([("twitter_username", format!("@{}", "a".repeat(15)))]);
        let update = UserProfileForm::new(&data).clean(&db).unwrap();
        assert_eq!(update.twitter_username, Some("a".repeat(15)));
    }

    #[test]
    fn test_references_must_exist() {
        let mut db = Database::in_memory();
        let artist = db.add_artist("Prince");
        let venue = db.add_venue("First Avenue", "Minneapolis");
        let show = db.add_show(artist, venue).unwrap();

        let data = form_data([
            ("favorite_artist", artist.to_string()),
            ("favorite_show", show.to_string()),
        ]);
        let update = UserProfileForm::new(&data).clean(&db).unwrap();
        assert_eq!(update.favorite_artist, Some(artist));
        assert_eq!(update.favorite_show, Some(show));

        // A venue key is not an artist key
        let data = form_data([
            ("favorite_artist", venue.to_string()),
            ("favorite_show", "not-a-number".to_owned()),
        ]);
        let errors = UserProfileForm::new(&data).clean(&db).unwrap_err();
        assert_eq!(
            errors.get("favorite_artist"),
            [FieldError::InvalidChoice(venue.to_string())]
        );
        assert_eq!(
            errors.get("favorite_show"),
            [FieldError::InvalidChoice("not-a-number".to_owned())]
        );
    }

    #[test]
    fn test_save_updates_profile() {
        let mut db = Database::in_memory();
        let user = db.create_user(new_user("bob", "bob@bob.com")).unwrap();

        let data = form_data([("twitter_username", "bobnotes"), ("bio", " Likes loud shows. ")]);
        UserProfileForm::new(&data).save(&mut db, user).unwrap();

        let profile = db.get_profile(user).unwrap();
        assert_eq!(profile.twitter_username.as_deref(), Some("bobnotes"));
        assert_eq!(profile.bio.as_deref(), Some("Likes loud shows."));

        assert!(matches!(
            UserProfileForm::new(&data).save(&mut db, UserPk(999)),
            Err(SaveError::Database(_))
        ));
    }
}
