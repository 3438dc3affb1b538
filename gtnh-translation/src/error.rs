//! All error types for the gtnh-translation crate.
//!
//! Malformed lines are never errors: the filetype parsers skip them. Errors are
//! reserved for missing format markers, unusable service records and failures
//! of the collaborators (disk, network).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("missing format marker `{marker}` in `{relpath}`")]
    MissingFormatMarker { relpath: String, marker: String },

    #[error("unknown filetype `{0}`")]
    UnknownFiletype(String),

    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("no {0} file found")]
    NoFiles(String),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("client error: {message}")]
    Client {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Creates a new missing-format-marker error.
    pub fn missing_marker(relpath: impl Into<String>, marker: impl Into<String>) -> Self {
        Error::MissingFormatMarker {
            relpath: relpath.into(),
            marker: marker.into(),
        }
    }

    /// Creates a new client error with optional source error
    pub fn client_error(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Client {
            message: message.into(),
            source,
        }
    }
}
