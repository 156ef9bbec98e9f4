use crate::types::ChunkId;

/// Maps text into a fixed-dimension vector space.
pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;
    fn max_len(&self) -> usize;
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>>;
}

/// A persistent similarity index over chunk texts.
///
/// Implementations assume a single caller; ingestion and querying are not
/// safe to interleave from several threads.
pub trait VectorStore: Send + Sync {
    /// Number of entries currently stored.
    fn count(&self) -> crate::Result<usize>;

    /// Store `chunks` under fresh ids continuing from [`VectorStore::count`],
    /// recording `source` as their origin. Empty input is a no-op.
    fn add_documents_from(&self, source: &str, chunks: &[String]) -> crate::Result<Vec<ChunkId>>;

    fn add_documents(&self, chunks: &[String]) -> crate::Result<Vec<ChunkId>> {
        self.add_documents_from(crate::types::UNKNOWN_SOURCE, chunks)
    }

    /// Up to `n_results` stored texts, most similar first. Ties keep the
    /// backing store's order, which is not deterministic.
    fn query(&self, search_text: &str, n_results: usize) -> crate::Result<Vec<String>>;
}
