//! Song catalog browser core: parse a CSV song list, then search, filter,
//! sort and index it for a rendering front end.

pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod library;

pub use error::{Error, Result};
pub use library::options::FilterOptions;
pub use library::query::{FacetKind, Query, Selection};
pub use library::song::Song;
pub use library::sort::{SortKey, Sorter};
pub use library::Catalog;
