//! Error types for songsearch

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Reading the catalog or a settings file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Quoted-dialect CSV reader rejected the input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Collation locale could not be parsed or has no data
    #[error("Collation error: {0}")]
    Collation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
