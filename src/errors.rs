use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChunkdrainError>;

/// Ways a drain can end other than with a complete result.
#[derive(Error, Debug)]
pub enum DrainError {
    #[error("Source fault: {0}")]
    Source(#[from] io::Error),
    #[error("Source wrote {written} bytes into a {requested} byte region")]
    ProtocolViolation { written: usize, requested: usize },
    #[error("Source made no progress for {attempts} consecutive reads")]
    Stalled { attempts: usize },
    #[error("Content exceeds the {limit} byte limit")]
    TooLarge { limit: usize },
}

#[derive(Error, Debug)]
pub enum ChunkdrainError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid URL format: {0}")]
    InvalidUrl(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid status code {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Drain(#[from] DrainError),
}

impl From<url::ParseError> for ChunkdrainError {
    fn from(e: url::ParseError) -> Self {
        Self::InvalidUrl(e.to_string())
    }
}

impl ChunkdrainError {
    /// The source fault behind this error, if the body transfer failed.
    pub fn source_fault(&self) -> Option<&io::Error> {
        match self {
            Self::Drain(DrainError::Source(e)) => Some(e),
            _ => None,
        }
    }
}
