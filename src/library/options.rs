use std::cmp::Reverse;
use std::collections::BTreeSet;

use super::query::FacetKind;
use super::song::Song;

/// Values of the second facet, matching the dataset's [`FacetKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecondaryOptions {
    /// Decade start years, most recent first.
    Decades(Vec<i64>),
    Moods(Vec<String>),
}

impl SecondaryOptions {
    /// Selection values as the query expects them (`"1990"` for decades).
    pub fn values(&self) -> Vec<String> {
        match self {
            SecondaryOptions::Decades(decades) => decades.iter().map(i64::to_string).collect(),
            SecondaryOptions::Moods(moods) => moods.clone(),
        }
    }

    pub fn labels(&self) -> Vec<String> {
        match self {
            SecondaryOptions::Decades(decades) => {
                decades.iter().map(|&d| decade_label(d)).collect()
            }
            SecondaryOptions::Moods(moods) => moods.clone(),
        }
    }
}

/// Distinct facet values of one dataset, for presenting as filter choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    pub genres: Vec<String>,
    pub secondary: SecondaryOptions,
    pub artists: Vec<String>,
}

pub fn decade_label(decade: i64) -> String {
    format!("{decade}年代")
}

pub fn index(songs: &[Song], facet: FacetKind) -> FilterOptions {
    let mut genres = BTreeSet::new();
    let mut artists = BTreeSet::new();
    for song in songs {
        genres.extend(song.genres());
        artists.extend(song.artists());
    }

    let secondary = match facet {
        FacetKind::Decade => {
            let decades: BTreeSet<Reverse<i64>> =
                songs.iter().filter_map(Song::decade).map(Reverse).collect();
            SecondaryOptions::Decades(decades.into_iter().map(|Reverse(d)| d).collect())
        }
        FacetKind::Mood => {
            let moods: BTreeSet<String> = songs
                .iter()
                .filter(|s| !s.mood.is_empty())
                .map(|s| s.mood.clone())
                .collect();
            SecondaryOptions::Moods(moods.into_iter().collect())
        }
    };

    FilterOptions {
        genres: genres.into_iter().collect(),
        secondary,
        artists: artists.into_iter().collect(),
    }
}
