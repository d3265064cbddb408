use log::debug;
use std::str::FromStr;

use crate::database::Database;
use crate::forms::{field, FormData, SaveError};
use crate::models::{NewNote, NotePk, Rating, ShowPk, UserPk};
use crate::utils::validation::{
    FieldError, FormErrors, TextInput, MAX_NOTE_TEXT_LENGTH, MAX_TITLE_LENGTH,
};

/// Form used to leave a note about a show
#[derive(Debug)]
pub struct NewNoteForm<'a> {
    data: &'a FormData,
}

impl<'a> NewNoteForm<'a> {
    pub const TITLE: &'static str = "title";
    pub const TEXT: &'static str = "text";
    pub const RATING: &'static str = "rating";

    pub fn new(data: &'a FormData) -> Self {
        Self { data }
    }

    /// Validates the title, text and optional rating
    pub fn clean(&self) -> Result<NewNote, FormErrors> {
        let mut errors = FormErrors::new();

        let title = errors.capture(
            Self::TITLE,
            TextInput::new(field(self.data, Self::TITLE), MAX_TITLE_LENGTH),
        );
        let text = errors.capture(
            Self::TEXT,
            TextInput::new(field(self.data, Self::TEXT), MAX_NOTE_TEXT_LENGTH),
        );
        let rating = errors.capture(Self::RATING, clean_rating(field(self.data, Self::RATING)));

        match (title, text, rating) {
            (Some(title), Some(text), Some(rating)) if errors.is_empty() => Ok(NewNote {
                title: title.into_string(),
                text: text.into_string(),
                rating,
            }),
            _ => {
                debug!(
                    "Note rejected, invalid fields: {:?}",
                    errors.fields().collect::<Vec<_>>()
                );
                Err(errors)
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        self.clean().is_ok()
    }

    /// Validates then stores the note as written by `user` about `show`
    pub fn save(&self, db: &mut Database, user: UserPk, show: ShowPk) -> Result<NotePk, SaveError> {
        let note = self.clean()?;
        Ok(db.add_note(user, show, note)?)
    }
}

fn clean_rating(raw: &str) -> Result<Option<Rating>, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    Rating::from_str(trimmed)
        .map(Some)
        .map_err(|_| FieldError::InvalidChoice(trimmed.to_owned()))
}
