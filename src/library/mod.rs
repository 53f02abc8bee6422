pub mod field;
pub mod loader;
pub mod options;
pub mod parser;
pub mod query;
pub mod song;
pub mod sort;

use std::fs;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::error::Result;
use field::Field;
use options::FilterOptions;
use parser::Dialect;
use query::{FacetKind, Query};
use song::Song;
use sort::{SortKey, Sorter};

/// The loaded song list. Never mutated after construction; every query
/// produces a new list.
#[derive(Debug, Clone)]
pub struct Catalog {
    songs: Vec<Song>,
    facet: FacetKind,
    options: FilterOptions,
}

impl Catalog {
    pub fn new(songs: Vec<Song>, facet: FacetKind) -> Self {
        let options = options::index(&songs, facet);
        Self {
            songs,
            facet,
            options,
        }
    }

    pub fn from_csv(text: &str, dialect: Dialect) -> Result<Self> {
        let table = parser::parse_table(text, dialect)?;
        let facet = if table.headers.iter().any(|h| Field::Mood.matches_header(h)) {
            FacetKind::Mood
        } else {
            FacetKind::Decade
        };
        let songs = table.records.iter().map(Song::from_record).collect();
        Ok(Self::new(songs, facet))
    }

    pub fn load(path: &Path, dialect: Dialect) -> Result<Self> {
        let bytes = fs::read(path)?;
        let text = String::from_utf8(bytes).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.utf8_error())
        })?;
        let catalog = Self::from_csv(&text, dialect)?;
        info!(
            path = %path.display(),
            songs = catalog.len(),
            facet = ?catalog.facet,
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn get(&self, index: usize) -> Option<&Song> {
        self.songs.get(index)
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn facet(&self) -> FacetKind {
        self.facet
    }

    /// Facet choices, computed once when the catalog was built.
    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn filter(&self, query: &Query) -> Vec<&Song> {
        query::filter(&self.songs, query, self.facet)
    }

    pub fn query(&self, query: &Query, key: SortKey, sorter: &Sorter) -> Vec<&Song> {
        let matched = self.filter(query);
        sorter.sort(&matched, key)
    }

    /// Same as [`Catalog::query`] but as positions into [`Catalog::songs`].
    pub fn search(&self, query: &Query, key: SortKey, sorter: &Sorter) -> Vec<usize> {
        let matched = query::filter_indices(&self.songs, query, self.facet);
        let sorted = sorter.sort_indices(&self.songs, &matched, key);
        debug!(
            term = %query.search_term,
            %key,
            matched = sorted.len(),
            total = self.len(),
            "catalog query"
        );
        sorted
    }

    pub fn random_song<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Song> {
        self.songs.choose(rng)
    }
}

pub fn random_from<'a, R: Rng + ?Sized>(songs: &[&'a Song], rng: &mut R) -> Option<&'a Song> {
    songs.choose(rng).copied()
}

/// Result count line shown above the song list.
pub fn result_summary(count: usize) -> String {
    if count == 0 {
        "沒有找到符合條件的歌曲".to_string()
    } else {
        format!("顯示 {count} 首歌曲")
    }
}
