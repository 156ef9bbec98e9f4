use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Could not find the main content ({selector}) in the page")]
    ContentNotFound { selector: String },

    #[error("No text to ingest from {0}")]
    EmptyDocument(String),

    #[error(transparent)]
    Core(#[from] denning_core::Error),
}

pub type Result<T> = std::result::Result<T, IngestError>;
