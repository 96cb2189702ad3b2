//! Dataset loading for the co-occurrence pipeline.
//!
//! The core never fetches or parses anything; this crate turns a CSV of order
//! line-items, read from a local file or a remote URL, into the `LineItem`
//! records the index builder consumes.

pub mod parse;
pub mod source;

use basketry_core::errors::{ApplicationError, DomainError};
use thiserror::Error;

pub use parse::parse_line_items;
pub use source::{source_for, DatasetSource, FileSource, HttpSource};

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("could not read dataset `{path}`: {source}")]
    Io { path: String, source: std::io::Error },
    #[error("could not fetch dataset `{url}`: {source}")]
    Http { url: String, source: reqwest::Error },
    #[error("could not parse dataset CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("dataset is missing required column `{0}`")]
    MissingColumn(String),
    #[error("malformed record at line {line}: missing or invalid `{field}`")]
    MalformedRecord { line: u64, field: String },
    #[error("unsupported dataset source `{0}` (expected a file path or http(s) URL)")]
    UnsupportedSource(String),
}

impl From<LoaderError> for ApplicationError {
    fn from(value: LoaderError) -> Self {
        match value {
            LoaderError::MalformedRecord { line, field } => {
                ApplicationError::Domain(DomainError::MalformedRecord { line, field })
            }
            other => ApplicationError::Dataset(other.to_string()),
        }
    }
}
