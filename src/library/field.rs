use super::parser::Record;

/// Catalog attribute, independent of the header spelling a dataset uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Artist,
    Year,
    Genre,
    Mood,
    Duration,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Title,
        Field::Artist,
        Field::Year,
        Field::Genre,
        Field::Mood,
        Field::Duration,
    ];

    /// Header spellings tried in order: traditional script, simplified script,
    /// then the keys of the other catalog variants.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::Title => &["歌曲", "歌名", "song"],
            Field::Artist => &["歌手", "singer"],
            Field::Year => &["年分", "年份", "year"],
            Field::Genre => &["類型", "类型", "曲风", "genre"],
            Field::Mood => &["心情標籤", "心情标签", "mood"],
            Field::Duration => &["時長", "时长", "duration"],
        }
    }

    pub fn matches_header(self, header: &str) -> bool {
        self.aliases().contains(&header)
    }
}

/// Value of the first alias present in the record, trimmed.
///
/// An alias counts as present even when its cell is empty, so a later alias
/// is never consulted once an earlier one exists. Returns an empty string
/// when no alias is present.
pub fn get(record: &Record, field: Field) -> String {
    field
        .aliases()
        .iter()
        .find_map(|alias| record.get(alias))
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

pub fn get_multi(record: &Record, field: Field) -> Vec<String> {
    split_multi(&get(record, field))
}

/// Split a `/`-joined value into trimmed, non-empty segments.
pub fn split_multi(value: &str) -> Vec<String> {
    value
        .split('/')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
