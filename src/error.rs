//! Error types.

use thiserror::Error;

/// Failure reading or writing a local storage slot.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage backend error: {0}")]
    Backend(#[from] sled::Error),

    #[error("Slot {0} does not hold valid UTF-8")]
    InvalidUtf8(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Failure creating a share link. Callers show one generic message for all variants.
#[derive(Debug, Error)]
pub enum ShareError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Share service responded with status {0}")]
    Status(u16),

    #[error("Invalid share service URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Failure creating a shared note on the server.
#[derive(Debug, Error)]
pub enum CreateShareError {
    #[error("Expiry of {0} hours is out of range")]
    InvalidExpiry(i64),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level error for the command-line front end.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Share(#[from] ShareError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("{0}")]
    Usage(String),
}
