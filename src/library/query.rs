use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::song::{parse_decade, Song};

/// Which field backs the second facet. Legacy catalogs carry a release year
/// and are filtered by decade; tag-augmented catalogs carry a mood tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetKind {
    #[default]
    Decade,
    Mood,
}

/// Facet choice: everything, or any of a set of values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    All,
    Only(BTreeSet<String>),
}

impl Selection {
    /// Build a selection from chosen values. Choosing nothing means `All`.
    pub fn only<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if set.is_empty() {
            Selection::All
        } else {
            Selection::Only(set)
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    fn any(&self, mut pred: impl FnMut(&str) -> bool) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(values) => values.iter().any(|v| pred(v)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub search_term: String,
    pub genres: Selection,
    /// Decade start years (`"1990"`) or mood tags, depending on [`FacetKind`].
    pub year_or_mood: Selection,
    pub artists: Selection,
}

impl Query {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            ..Default::default()
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.search_term.is_empty()
            && self.genres.is_all()
            && self.year_or_mood.is_all()
            && self.artists.is_all()
    }
}

/// Query prepared once per pass over the dataset.
struct Matcher<'q> {
    term: String,
    query: &'q Query,
    facet: FacetKind,
    decades: Vec<Option<i64>>,
}

impl<'q> Matcher<'q> {
    fn new(query: &'q Query, facet: FacetKind) -> Self {
        let decades = match (&query.year_or_mood, facet) {
            (Selection::Only(values), FacetKind::Decade) => {
                values.iter().map(|v| parse_decade(v)).collect()
            }
            _ => Vec::new(),
        };
        Self {
            term: query.search_term.to_lowercase(),
            query,
            facet,
            decades,
        }
    }

    fn matches(&self, song: &Song) -> bool {
        self.matches_search(song)
            && self.matches_genre(song)
            && self.matches_year_or_mood(song)
            && self.matches_artist(song)
    }

    fn matches_search(&self, song: &Song) -> bool {
        if self.term.is_empty() {
            return true;
        }
        [&song.title, &song.artist, &song.year, &song.genre, &song.mood]
            .iter()
            .any(|value| !value.is_empty() && value.to_lowercase().contains(&self.term))
    }

    fn matches_genre(&self, song: &Song) -> bool {
        match &self.query.genres {
            Selection::All => true,
            sel => !song.genre.is_empty() && sel.any(|g| song.genre.contains(g)),
        }
    }

    fn matches_year_or_mood(&self, song: &Song) -> bool {
        if self.query.year_or_mood.is_all() {
            return true;
        }
        match self.facet {
            FacetKind::Decade => {
                let Some(year) = song.year_value().map(i64::from) else {
                    return false;
                };
                self.decades.iter().flatten().any(|&decade| {
                    year.checked_sub(decade)
                        .is_some_and(|offset| (0..10).contains(&offset))
                })
            }
            FacetKind::Mood => {
                !song.mood.is_empty() && self.query.year_or_mood.any(|m| song.mood == m)
            }
        }
    }

    fn matches_artist(&self, song: &Song) -> bool {
        if self.query.artists.is_all() {
            return true;
        }
        let artists = song.artists();
        self.query
            .artists
            .any(|wanted| artists.iter().any(|a| a == wanted))
    }
}

pub fn matches(song: &Song, query: &Query, facet: FacetKind) -> bool {
    Matcher::new(query, facet).matches(song)
}

/// Songs satisfying every part of `query`, in their input order.
pub fn filter<'a, I>(songs: I, query: &Query, facet: FacetKind) -> Vec<&'a Song>
where
    I: IntoIterator<Item = &'a Song>,
{
    let matcher = Matcher::new(query, facet);
    songs.into_iter().filter(|song| matcher.matches(song)).collect()
}

/// Positions of the matching songs, ascending.
pub fn filter_indices(songs: &[Song], query: &Query, facet: FacetKind) -> Vec<usize> {
    let matcher = Matcher::new(query, facet);
    songs
        .iter()
        .enumerate()
        .filter(|(_, song)| matcher.matches(song))
        .map(|(i, _)| i)
        .collect()
}
