//! Web ingestion: fetch a legislation page, keep its main content, chunk it
//! and write the chunks to a vector store.

use std::time::Duration;
use tracing::{error, info};

use denning_core::config::IngestSettings;
use denning_core::{ChunkId, ChunkingConfig, Settings, VectorStore};

mod error;
pub mod extract;
pub mod fetch;

pub use error::{IngestError, Result};
pub use extract::{extract_content, DEFAULT_CONTENT_SELECTOR};
pub use fetch::{fetch_page, validate_url};

/// What one ingestion wrote.
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub source: String,
    pub chunks: usize,
    pub ids: Vec<ChunkId>,
}

pub struct Ingestor {
    store: Box<dyn VectorStore>,
    chunking: ChunkingConfig,
    selector: String,
    timeout: Duration,
}

impl Ingestor {
    pub fn new(store: Box<dyn VectorStore>, chunking: ChunkingConfig, ingest: &IngestSettings) -> Result<Self> {
        chunking.validate()?;
        Ok(Self {
            store,
            chunking,
            selector: ingest.content_selector.clone(),
            timeout: Duration::from_secs(ingest.fetch_timeout_secs),
        })
    }

    pub fn from_settings(settings: &Settings, store: Box<dyn VectorStore>) -> Result<Self> {
        Self::new(store, settings.chunking, &settings.ingest)
    }

    pub fn store(&self) -> &dyn VectorStore {
        self.store.as_ref()
    }

    pub fn ingest_url(&self, url: &str) -> Result<IngestReport> {
        let html = fetch_page(url, self.timeout).inspect_err(|e| error!("Error fetching URL: {e}"))?;
        self.ingest_html(url, &html)
    }

    /// Ingest an already fetched page.
    pub fn ingest_html(&self, source: &str, html: &str) -> Result<IngestReport> {
        let text = extract_content(html, &self.selector)?;
        self.ingest_text(source, &text)
    }

    pub fn ingest_text(&self, source: &str, text: &str) -> Result<IngestReport> {
        if text.trim().is_empty() {
            return Err(IngestError::EmptyDocument(source.to_string()));
        }
        let chunks = self.chunking.chunk(text)?;
        if chunks.is_empty() {
            return Err(IngestError::EmptyDocument(source.to_string()));
        }
        info!(source, chunks = chunks.len(), "Adding chunks to the vector database");
        let ids = self.store.add_documents_from(source, &chunks)?;
        info!(source, added = ids.len(), "Ingestion complete");
        Ok(IngestReport { source: source.to_string(), chunks: chunks.len(), ids })
    }
}
