//! In-memory storage of users, profiles, shows and notes, saved as YAML.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs::{create_dir_all, File},
    io::{self, ErrorKind::NotFound},
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::models::{
    Artist, ArtistPk, NewNote, NewUser, Note, NotePk, Profile, ProfileUpdate, Show, ShowPk, User,
    UserPk, Venue, VenuePk,
};
use crate::utils::validation::normalize_username;

#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Database {
    #[serde(skip)]
    path: Option<PathBuf>,
    next_pk: u64,
    users: BTreeMap<UserPk, User>,
    profiles: BTreeMap<UserPk, Profile>,
    artists: BTreeMap<ArtistPk, Artist>,
    venues: BTreeMap<VenuePk, Venue>,
    shows: BTreeMap<ShowPk, Show>,
    notes: BTreeMap<NotePk, Note>,
}

#[derive(Debug, Error)]
pub enum DBError {
    #[error("Invalid user ID: {0}")]
    InvalidUserID(UserPk),
    #[error("Invalid artist ID: {0}")]
    InvalidArtistID(ArtistPk),
    #[error("Invalid venue ID: {0}")]
    InvalidVenueID(VenuePk),
    #[error("Invalid show ID: {0}")]
    InvalidShowID(ShowPk),
    #[error("User already exists: {username}")]
    UserAlreadyExists { username: String },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl Database {
    /// Opens the store saved at `path`, creating an empty one if the file does
    /// not exist yet.
    pub fn open(path: PathBuf) -> Result<Self, DBError> {
        match File::open(&path) {
            Ok(f) => {
                let mut db: Self = serde_yaml::from_reader(f).inspect_err(|e| {
                    warn!("Could not parse DB file {}: {e}", path.display());
                })?;
                db.path = Some(path);
                Ok(db)
            }

            Err(not_found) if not_found.kind() == NotFound => {
                info!("DB file not found, creating new empty DB at {}", path.display());
                let new_db = Self {
                    path: Some(path),
                    ..Self::default()
                };

                // Saved right away so that an unwritable path fails at start-up
                new_db.save()?;
                Ok(new_db)
            }

            Err(other) => Err(other.into()),
        }
    }

    /// A store without backing file; `save` does nothing
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn save(&self) -> Result<(), DBError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent_dir) = path.parent() {
            if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
                create_dir_all(parent_dir)?;
            }
        }

        let file = File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }

    fn allocate_pk(&mut self) -> u64 {
        self.next_pk += 1;
        self.next_pk
    }

    // --- Users ---

    /// Finds a user by username, ignoring case and compatibility forms
    pub fn lookup_username(&self, username: &str) -> Option<&User> {
        let wanted = normalize_username(username).to_lowercase();
        self.users
            .values()
            .find(|user| user.username.to_lowercase() == wanted)
    }

    /// Finds a user by email, ignoring case
    pub fn lookup_email(&self, email: &str) -> Option<&User> {
        let wanted = email.to_lowercase();
        self.users
            .values()
            .find(|user| user.email.to_lowercase() == wanted)
    }

    pub fn username_taken(&self, username: &str) -> bool {
        self.lookup_username(username).is_some()
    }

    pub fn email_taken(&self, email: &str) -> bool {
        self.lookup_email(email).is_some()
    }

    pub fn get_user(&self, user: UserPk) -> Result<&User, DBError> {
        self.users.get(&user).ok_or(DBError::InvalidUserID(user))
    }

    pub fn users(&self) -> impl Iterator<Item = &User> + '_ {
        self.users.values()
    }

    /// Stores a new user. Fails if the username or email is already in use,
    /// whatever its case.
    pub fn create_user(&mut self, new_user: NewUser) -> Result<UserPk, DBError> {
        if self.username_taken(&new_user.username) || self.email_taken(&new_user.email) {
            return Err(DBError::UserAlreadyExists {
                username: new_user.username,
            });
        }

        let NewUser {
            username,
            email,
            first_name,
            last_name,
            password,
        } = new_user;

        let pk = UserPk(self.allocate_pk());
        let user = User {
            pk,
            username,
            email: email.to_lowercase(),
            first_name,
            last_name,
            password,
        };

        info!("Account created for user {}", user);
        self.users.insert(pk, user);
        Ok(pk)
    }

    // --- Profiles ---

    pub fn get_profile(&self, user: UserPk) -> Option<&Profile> {
        self.profiles.get(&user)
    }

    /// Replaces the profile of `user`, creating it on first update
    pub fn update_profile(&mut self, user: UserPk, update: ProfileUpdate) -> Result<(), DBError> {
        self.get_user(user)?;
        if let Some(artist) = update.favorite_artist {
            self.get_artist(artist)?;
        }
        if let Some(show) = update.favorite_show {
            self.get_show(show)?;
        }

        self.profiles
            .entry(user)
            .or_insert_with(|| Profile::new(user))
            .apply(update);
        Ok(())
    }

    // --- Artists, venues and shows ---

    pub fn add_artist(&mut self, name: &str) -> ArtistPk {
        let pk = ArtistPk(self.allocate_pk());
        self.artists.insert(
            pk,
            Artist {
                pk,
                name: name.to_owned(),
            },
        );
        pk
    }

    pub fn get_artist(&self, artist: ArtistPk) -> Result<&Artist, DBError> {
        self.artists
            .get(&artist)
            .ok_or(DBError::InvalidArtistID(artist))
    }

    pub fn add_venue(&mut self, name: &str, city: &str) -> VenuePk {
        let pk = VenuePk(self.allocate_pk());
        self.venues.insert(
            pk,
            Venue {
                pk,
                name: name.to_owned(),
                city: city.to_owned(),
            },
        );
        pk
    }

    pub fn get_venue(&self, venue: VenuePk) -> Result<&Venue, DBError> {
        self.venues.get(&venue).ok_or(DBError::InvalidVenueID(venue))
    }

    pub fn add_show(&mut self, artist: ArtistPk, venue: VenuePk) -> Result<ShowPk, DBError> {
        self.get_artist(artist)?;
        self.get_venue(venue)?;

        let pk = ShowPk(self.allocate_pk());
        self.shows.insert(pk, Show { pk, artist, venue });
        Ok(pk)
    }

    pub fn get_show(&self, show: ShowPk) -> Result<&Show, DBError> {
        self.shows.get(&show).ok_or(DBError::InvalidShowID(show))
    }

    // --- Notes ---

    pub fn add_note(
        &mut self,
        user: UserPk,
        show: ShowPk,
        note: NewNote,
    ) -> Result<NotePk, DBError> {
        self.get_user(user)?;
        self.get_show(show)?;

        let NewNote {
            title,
            text,
            rating,
        } = note;

        let pk = NotePk(self.allocate_pk());
        let note = Note {
            pk,
            user,
            show,
            title,
            text,
            rating,
        };

        info!("Note {} created for show {}", pk, show);
        self.notes.insert(pk, note);
        Ok(pk)
    }

    pub fn get_note(&self, note: NotePk) -> Option<&Note> {
        self.notes.get(&note)
    }

    pub fn notes_for_show(&self, show: ShowPk) -> impl Iterator<Item = &Note> + '_ {
        self.notes.values().filter(move |note| note.show == show)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::Rating;
    use crate::utils::password_utils::hash;

    pub(crate) fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_owned(),
            email: email.to_owned(),
            first_name: "bob".to_owned(),
            last_name: "bob".to_owned(),
            password: hash("q!w$er^ty6ui7op").unwrap(),
        }
    }

    #[test]
    fn test_lookups_ignore_case() {
        let mut db = Database::in_memory();
        let bob = db.create_user(new_user("bob", "bob@bob.com")).unwrap();

        for username in ["bob", "BOB", "BOb", "Bob", "bOB", "bOb", "boB"] {
            assert_eq!(db.lookup_username(username).map(|u| u.pk), Some(bob));
        }
        for email in ["BOB@bOb.com", "BOb@bob.cOm", "Bob@bob.coM", "BOB@BOB.COM"] {
            assert!(db.email_taken(email), "{email} should match bob@bob.com");
        }
        assert!(!db.username_taken("bobby"));
        assert!(!db.email_taken("another_bob@bob.com"));
    }

    #[test]
    fn test_create_user_rejects_duplicates() {
        let mut db = Database::in_memory();
        db.create_user(new_user("bob", "bob@bob.com")).unwrap();

        assert!(matches!(
            db.create_user(new_user("BOB", "other@bob.com")),
            Err(DBError::UserAlreadyExists { .. })
        ));
        assert!(matches!(
            db.create_user(new_user("another_bob", "Bob@Bob.com")),
            Err(DBError::UserAlreadyExists { .. })
        ));
        assert_eq!(db.users().count(), 1);
    }

    #[test]
    fn test_email_is_stored_lowercased() {
        let mut db = Database::in_memory();
        let pk = db.create_user(new_user("bob", "Bob@Bob.COM")).unwrap();
        assert_eq!(db.get_user(pk).unwrap().email, "bob@bob.com");
    }

    #[test]
    fn test_shows_and_notes_require_existing_rows() {
        let mut db = Database::in_memory();
        let user = db.create_user(new_user("bob", "bob@bob.com")).unwrap();
        let artist = db.add_artist("The Replacements");
        let venue = db.add_venue("First Avenue", "Minneapolis");

        assert!(matches!(
            db.add_show(ArtistPk(999), venue),
            Err(DBError::InvalidArtistID(ArtistPk(999)))
        ));
        let show = db.add_show(artist, venue).unwrap();

        let note = NewNote {
            title: "Loud".to_owned(),
            text: "Very loud.".to_owned(),
            rating: Some(Rating::Great),
        };
        assert!(matches!(
            db.add_note(UserPk(999), show, note.clone()),
            Err(DBError::InvalidUserID(_))
        ));
        let pk = db.add_note(user, show, note).unwrap();

        assert_eq!(db.get_note(pk).map(|n| n.rating), Some(Some(Rating::Great)));
        assert_eq!(db.notes_for_show(show).count(), 1);
    }

    #[test]
    fn test_update_profile_creates_then_replaces() {
        let mut db = Database::in_memory();
        let user = db.create_user(new_user("bob", "bob@bob.com")).unwrap();
        let artist = db.add_artist("Prince");

        db.update_profile(
            user,
            ProfileUpdate {
                twitter_username: Some("bob".to_owned()),
                favorite_artist: Some(artist),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(db.get_profile(user).unwrap().favorite_artist, Some(artist));

        db.update_profile(user, ProfileUpdate::default()).unwrap();
        assert_eq!(db.get_profile(user), Some(&Profile::new(user)));

        assert!(matches!(
            db.update_profile(
                user,
                ProfileUpdate {
                    favorite_show: Some(ShowPk(42)),
                    ..Default::default()
                }
            ),
            Err(DBError::InvalidShowID(ShowPk(42)))
        ));
    }

    #[test]
    fn test_open_creates_then_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("lmn.yaml");

        let mut db = Database::open(path.clone()).unwrap();
        assert!(path.exists(), "Opening a missing DB should create its file");

        let user = db.create_user(new_user("bob", "bob@bob.com")).unwrap();
        let artist = db.add_artist("Prince");
        db.save().unwrap();

        let reloaded = Database::open(path.clone()).unwrap();
        assert_eq!(reloaded.path(), Some(path.as_path()));
        assert_eq!(reloaded.get_user(user).unwrap().username, "bob");
        assert_eq!(reloaded.get_artist(artist).unwrap().name, "Prince");

        // Primary keys keep increasing after a reload
        let mut reloaded = reloaded;
        assert!(reloaded.add_artist("Hüsker Dü").0 > artist.0);
    }

    #[test]
    fn test_open_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lmn.yaml");
        std::fs::write(&path, "users: [not, a, map]").unwrap();

        assert!(matches!(Database::open(path), Err(DBError::Yaml(_))));
    }

    #[test]
    fn test_in_memory_save_is_noop() {
        let db = Database::in_memory();
        assert!(db.path().is_none());
        assert!(db.save().is_ok());
    }
}
