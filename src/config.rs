//! Settings file for the browser host

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::library::parser::Dialect;
use crate::library::sort::{SortKey, DEFAULT_LOCALE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog file, relative to the working directory.
    pub csv_path: PathBuf,
    pub dialect: Dialect,
    /// BCP 47 locale used for title and artist ordering.
    pub collation_locale: String,
    /// Quiet period before a typed search runs.
    pub debounce_ms: u64,
    pub default_sort: SortKey,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("songlist.csv"),
            dialect: Dialect::Naive,
            collation_locale: DEFAULT_LOCALE.to_string(),
            debounce_ms: 300,
            default_sort: SortKey::Default,
        }
    }
}

impl Config {
    /// Defaults when the file does not exist; an error when it exists but
    /// does not parse.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
