//! Error types for the interview pipeline.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid filename format: {filename} ({reason})")]
    InvalidFilenameFormat { filename: String, reason: String },

    #[error("Unknown document kind: {0}")]
    UnknownDocumentKind(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Duplicate content: hash={0}")]
    DuplicateContent(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Shorthand for a filename that does not follow the six-token grammar.
    pub fn invalid_filename(filename: &str, reason: impl Into<String>) -> Self {
        Self::InvalidFilenameFormat {
            filename: filename.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
