use thiserror::Error;

use crate::template::TemplateError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Missing credential: {0} is not set")]
    MissingCredential(String),

    #[error("Prompt template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Embedding error: {0}")]
    Embedding(String),
}

impl Error {
    /// Wrap a backing-store failure, keeping the whole cause chain in the message.
    pub fn storage(err: impl Into<anyhow::Error>) -> Self {
        Self::Storage(format!("{:#}", err.into()))
    }

    pub fn embedding(err: impl Into<anyhow::Error>) -> Self {
        Self::Embedding(format!("{:#}", err.into()))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
