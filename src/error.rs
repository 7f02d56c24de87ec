// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScanError>;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to list {form} filings for {date}: {message}")]
    Provider {
        form: String,
        date: NaiveDate,
        message: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Sink error: {0}")]
    Sink(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Failure to read one textual surface of a filing.
///
/// The surface scanner treats every variant as "no match on that surface";
/// none of them abort a filing or a scan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("surface not available: {0}")]
    Unavailable(String),

    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("decode failed: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for SurfaceError {
    fn from(err: reqwest::Error) -> Self {
        SurfaceError::Fetch(err.to_string())
    }
}
