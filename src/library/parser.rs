use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// How rows are split into cells.
///
/// `Naive` splits on every comma and has no quoting; a title containing a
/// literal comma shifts every later column of that row. `Quoted` reads
/// RFC 4180 quoting instead, which changes the result for legacy rows that
/// contain `"` characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Naive,
    Quoted,
}

/// One data row: header name -> raw cell text (untrimmed).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    cells: BTreeMap<String, String>,
}

impl Record {
    fn zip<'a>(headers: &[String], cells: impl Iterator<Item = &'a str>) -> Self {
        let mut map = BTreeMap::new();
        // Later duplicates of a header overwrite earlier ones.
        for (header, cell) in headers.iter().zip(cells) {
            map.insert(header.clone(), cell.to_string());
        }
        Self { cells: map }
    }

    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells.get(header).map(String::as_str)
    }

    pub fn contains(&self, header: &str) -> bool {
        self.cells.contains_key(header)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Parsed CSV: the cleaned header row and every data row in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

/// Parse with the naive comma split. Empty input gives an empty list.
pub fn parse(text: &str) -> Vec<Record> {
    parse_naive(text).records
}

pub fn parse_table(text: &str, dialect: Dialect) -> Result<Table> {
    let table = match dialect {
        Dialect::Naive => parse_naive(text),
        Dialect::Quoted => parse_quoted(text)?,
    };
    debug!(headers = ?table.headers, rows = table.records.len(), ?dialect, "parsed csv");
    Ok(table)
}

/// Spreadsheet exports leave stray whitespace and a byte-order mark in the header row.
fn clean_header(raw: &str) -> String {
    raw.trim().trim_start_matches('\u{feff}').trim().to_string()
}

fn parse_naive(text: &str) -> Table {
    let mut lines = text.split('\n').filter(|line| !line.trim().is_empty());

    let Some(header_line) = lines.next() else {
        return Table::default();
    };
    let headers: Vec<String> = header_line.split(',').map(clean_header).collect();

    let records = lines
        .map(|line| Record::zip(&headers, line.split(',')))
        .collect();

    Table { headers, records }
}

fn parse_quoted(text: &str) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut headers: Option<Vec<String>> = None;
    let mut records = Vec::new();

    for row in reader.records() {
        let row = row?;
        if row.len() <= 1 && row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        match &headers {
            None => headers = Some(row.iter().map(clean_header).collect()),
            Some(h) => records.push(Record::zip(h, row.iter())),
        }
    }

    Ok(Table {
        headers: headers.unwrap_or_default(),
        records,
    })
}
