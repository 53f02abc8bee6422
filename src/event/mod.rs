pub mod debounce;

use crate::error::Result;
use crate::library::Catalog;

/// Messages delivered to the browser loop.
#[derive(Debug)]
pub enum Event {
    /// The background load finished, successfully or not.
    CatalogReady(Result<Catalog>),
    /// Search box contents after a keystroke.
    SearchInput(String),
    Tick,
}
