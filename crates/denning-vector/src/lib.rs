//! Persistent vector index over LanceDB.
//!
//! `VectorDb` keeps one table per collection under a local directory and
//! exposes the synchronous [`VectorStore`] contract. It owns a Tokio runtime
//! and blocks on the async LanceDB client, so callers must not already be
//! inside a runtime.

use anyhow::{anyhow, Context};
use indicatif::{ProgressBar, ProgressStyle};
use lancedb::{Connection, Table};
use std::path::Path;
use tokio::runtime::Runtime;
use tracing::{debug, info, warn};

use denning_core::types::next_chunk_ids;
use denning_core::{ChunkId, Embedder, Error, Result, Settings, VectorStore};

pub mod schema;
pub mod search;
pub mod table;
pub mod writer;

pub use search::ScoredChunk;
pub use writer::IndexEntry;

/// Number of chunk texts handed to the embedder at once.
pub const EMBED_BATCH_SIZE: usize = 32;

pub struct VectorDb {
    runtime: Runtime,
    // Keeps the connection alive for the table handle.
    _db: Connection,
    table: Table,
    collection: String,
    embedder: Box<dyn Embedder>,
    dim: i32,
    show_progress: bool,
}

impl VectorDb {
    /// Open (or create) `collection` in the database directory at `path`.
    pub fn open(path: impl AsRef<Path>, collection: &str, embedder: Box<dyn Embedder>) -> Result<Self> {
        let path = path.as_ref();
        std::fs::create_dir_all(path)
            .with_context(|| format!("creating vector database directory {}", path.display()))
            .map_err(Error::storage)?;
        if embedder.dim() == 0 {
            return Err(Error::InvalidConfig("embedding dimension must be at least 1".to_string()));
        }
        let dim = i32::try_from(embedder.dim()).map_err(|_| Error::InvalidConfig(format!("embedding dimension {} is too large", embedder.dim())))?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("starting storage runtime")
            .map_err(Error::storage)?;
        let uri = path.to_string_lossy().to_string();
        let (db, table, count) = runtime
            .block_on(async {
                let db = table::open_db(&uri).await?;
                let table = table::ensure_table(&db, collection, schema::build_arrow_schema(dim)).await?;
                let existing = schema::vector_dim(table.schema().await?.as_ref());
                if existing != Some(dim) {
                    return Err(anyhow!("collection {collection} stores vectors of dimension {existing:?} but the embedder produces {dim}"));
                }
                let count = table::count_rows(&table).await?;
                Ok::<_, anyhow::Error>((db, table, count))
            })
            .map_err(Error::storage)?;
        info!(path = %path.display(), collection, count, "Opened vector database");

        Ok(Self { runtime, _db: db, table, collection: collection.to_string(), embedder, dim, show_progress: false })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let embedder = denning_embed::embedder_from_settings(&settings.embedding).map_err(Error::embedding)?;
        Self::open(settings.vector_db_dir(), &settings.collection_name, embedder)
    }

    /// Draw a progress bar on stderr while embedding.
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Nearest chunks to `search_text` with their cosine distances, closest first.
    pub fn search_scored(&self, search_text: &str, n_results: usize) -> Result<Vec<ScoredChunk>> {
        if n_results == 0 || self.count()? == 0 {
            return Ok(Vec::new());
        }
        let query_vec = self
            .embedder
            .embed_batch(&[search_text.to_string()])
            .map_err(Error::embedding)?
            .pop()
            .ok_or_else(|| Error::Embedding("embedder returned no vector for the query".to_string()))?;
        self.check_dim(&query_vec)?;
        let hits = self
            .runtime
            .block_on(search::search_nearest(&self.table, query_vec, n_results))
            .map_err(Error::storage)?;
        debug!(n_results, hits = hits.len(), "Vector search finished");
        Ok(hits)
    }

    fn check_dim(&self, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dim as usize {
            return Err(Error::Embedding(format!("embedder produced {} values, index expects {}", vector.len(), self.dim)));
        }
        Ok(())
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({percent}%) {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }

    fn embed_all(&self, chunks: &[String]) -> Result<Vec<Vec<f32>>> {
        let pb = self.progress_bar(chunks.len());
        let mut vectors = Vec::with_capacity(chunks.len());
        for batch in chunks.chunks(EMBED_BATCH_SIZE) {
            let embedded = self.embedder.embed_batch(batch).map_err(Error::embedding)?;
            if embedded.len() != batch.len() {
                return Err(Error::Embedding(format!("embedder returned {} vectors for {} texts", embedded.len(), batch.len())));
            }
            for v in &embedded {
                self.check_dim(v)?;
            }
            vectors.extend(embedded);
            pb.inc(batch.len() as u64);
        }
        pb.finish_and_clear();
        Ok(vectors)
    }
}

impl VectorStore for VectorDb {
    fn count(&self) -> Result<usize> {
        self.runtime.block_on(table::count_rows(&self.table)).map_err(Error::storage)
    }

    fn add_documents_from(&self, source: &str, chunks: &[String]) -> Result<Vec<ChunkId>> {
        if chunks.is_empty() {
            warn!(collection = %self.collection, "No chunks to add");
            return Ok(Vec::new());
        }
        let ids = next_chunk_ids(self.count()?, chunks.len());
        let vectors = self.embed_all(chunks)?;
        let ingested_at = chrono::Utc::now().timestamp_millis();
        let entries: Vec<IndexEntry> = ids
            .iter()
            .zip(chunks)
            .zip(vectors)
            .map(|((id, content), vector)| IndexEntry {
                id: id.clone(),
                content: content.clone(),
                source: source.to_string(),
                ingested_at,
                vector,
            })
            .collect();
        self.runtime
            .block_on(writer::insert_entries(&self.table, &entries, self.dim))
            .map_err(Error::storage)?;
        info!(collection = %self.collection, source, added = ids.len(), "Added chunks to vector database");
        Ok(ids)
    }

    fn query(&self, search_text: &str, n_results: usize) -> Result<Vec<String>> {
        Ok(self.search_scored(search_text, n_results)?.into_iter().map(|hit| hit.content).collect())
    }
}
