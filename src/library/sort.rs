use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};
use icu_locale_core::Locale;
use serde::{Deserialize, Serialize};

use super::song::Song;
use crate::error::{Error, Result};

pub const DEFAULT_LOCALE: &str = "zh";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// CSV row order.
    #[default]
    Default,
    TitleAsc,
    TitleDesc,
    ArtistAsc,
    ArtistDesc,
    YearAsc,
    YearDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 7] = [
        SortKey::Default,
        SortKey::TitleAsc,
        SortKey::TitleDesc,
        SortKey::ArtistAsc,
        SortKey::ArtistDesc,
        SortKey::YearAsc,
        SortKey::YearDesc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Default => "default",
            SortKey::TitleAsc => "title-asc",
            SortKey::TitleDesc => "title-desc",
            SortKey::ArtistAsc => "artist-asc",
            SortKey::ArtistDesc => "artist-desc",
            SortKey::YearAsc => "year-asc",
            SortKey::YearDesc => "year-desc",
        }
    }

    fn is_descending(self) -> bool {
        matches!(
            self,
            SortKey::TitleDesc | SortKey::ArtistDesc | SortKey::YearDesc
        )
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("unknown sort key: {s}"))
    }
}

/// Orders songs by a [`SortKey`], comparing text with a locale collator.
pub struct Sorter {
    collator: CollatorBorrowed<'static>,
    locale: String,
}

impl fmt::Debug for Sorter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sorter").field("locale", &self.locale).finish()
    }
}

impl Sorter {
    /// Collator for a BCP 47 locale such as `zh` (pinyin order) or `zh-u-co-stroke`.
    pub fn new(locale: &str) -> Result<Self> {
        let parsed = Locale::try_from_str(locale)
            .map_err(|e| Error::Collation(format!("{locale}: {e}")))?;
        let collator = Collator::try_new(parsed.into(), CollatorOptions::default())
            .map_err(|e| Error::Collation(format!("{locale}: {e}")))?;
        Ok(Self {
            collator,
            locale: locale.to_string(),
        })
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.collator.compare(a, b)
    }

    /// A new list ordered by `key`. Equal keys keep their input order and
    /// `SortKey::Default` returns the input order unchanged.
    pub fn sort<'a>(&self, songs: &[&'a Song], key: SortKey) -> Vec<&'a Song> {
        let mut sorted = songs.to_vec();
        if key != SortKey::Default {
            // slice::sort_by is stable, so ties stay in input order.
            sorted.sort_by(|a, b| self.compare_songs(a, b, key));
        }
        sorted
    }

    /// Like [`Sorter::sort`] for positions into `songs`. Every position must
    /// be in bounds; [`Catalog::search`](super::Catalog::search) only passes
    /// positions produced by filtering the same slice.
    pub(crate) fn sort_indices(&self, songs: &[Song], indices: &[usize], key: SortKey) -> Vec<usize> {
        let mut sorted = indices.to_vec();
        if key != SortKey::Default {
            sorted.sort_by(|&a, &b| self.compare_songs(&songs[a], &songs[b], key));
        }
        sorted
    }

    fn compare_songs(&self, a: &Song, b: &Song, key: SortKey) -> Ordering {
        let (a, b) = if key.is_descending() { (b, a) } else { (a, b) };
        match key {
            SortKey::TitleAsc | SortKey::TitleDesc => self.compare(&a.title, &b.title),
            SortKey::ArtistAsc | SortKey::ArtistDesc => self.compare(&a.artist, &b.artist),
            SortKey::YearAsc | SortKey::YearDesc => year_or_zero(a).cmp(&year_or_zero(b)),
            SortKey::Default => Ordering::Equal,
        }
    }
}

fn year_or_zero(song: &Song) -> i32 {
    song.year_value().unwrap_or(0)
}
