use std::str::FromStr;

use super::field::{self, Field};
use super::parser::Record;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Song {
    pub title: String,
    /// Raw artist text; several artists are joined by `/`.
    pub artist: String,
    pub year: String,
    /// Raw genre text; several tags are joined by `/`, the first is primary.
    pub genre: String,
    pub mood: String,
    pub duration: String,
}

impl Song {
    pub fn from_record(record: &Record) -> Self {
        Self {
            title: field::get(record, Field::Title),
            artist: field::get(record, Field::Artist),
            year: field::get(record, Field::Year),
            genre: field::get(record, Field::Genre),
            mood: field::get(record, Field::Mood),
            duration: field::get(record, Field::Duration),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Artist => &self.artist,
            Field::Year => &self.year,
            Field::Genre => &self.genre,
            Field::Mood => &self.mood,
            Field::Duration => &self.duration,
        }
    }

    pub fn artists(&self) -> Vec<String> {
        field::split_multi(&self.artist)
    }

    pub fn genres(&self) -> Vec<String> {
        field::split_multi(&self.genre)
    }

    pub fn primary_genre(&self) -> &str {
        self.genre.split('/').next().unwrap_or("").trim()
    }

    pub fn year_value(&self) -> Option<i32> {
        parse_year(&self.year)
    }

    /// Start year of the decade this song belongs to. Widened so the
    /// bucket of any `i32` year is representable.
    pub fn decade(&self) -> Option<i64> {
        self.year_value().map(|y| i64::from(y).div_euclid(10) * 10)
    }

    /// Text placed on the clipboard when a song is picked.
    pub fn clipboard_text(&self) -> String {
        format!("{} - {}", self.title, self.artist)
    }
}

/// Integer prefix of `text`: optional leading whitespace and sign, then
/// digits. `"1987"` and `"1987年"` give 1987; text without leading digits
/// gives `None`.
pub fn parse_year(text: &str) -> Option<i32> {
    int_prefix(text)
}

/// Decade selection value, parsed like a year but in the widened range
/// produced by [`Song::decade`].
pub(crate) fn parse_decade(text: &str) -> Option<i64> {
    int_prefix(text)
}

fn int_prefix<T: FromStr>(text: &str) -> Option<T> {
    let text = text.trim_start();
    let sign = usize::from(text.starts_with(['-', '+']));
    let end = text[sign..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(text.len(), |i| sign + i);
    text[..end].parse().ok()
}
