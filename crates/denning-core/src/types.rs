//! Identifiers and query outcomes shared by the store, retriever and agent.

pub type ChunkId = String;

/// Source recorded for chunks added without one.
pub const UNKNOWN_SOURCE: &str = "unknown";

/// Identifier of the `n`-th entry ever written to an index.
pub fn chunk_id(n: usize) -> ChunkId {
    format!("id_{n}")
}

/// Ids for a batch of `len` chunks written after `existing` entries.
pub fn next_chunk_ids(existing: usize, len: usize) -> Vec<ChunkId> {
    (existing..existing + len).map(chunk_id).collect()
}

/// Outcome of a retrieval, keeping "nothing matched" apart from "search failed".
#[derive(Debug)]
pub enum Retrieval {
    Found(Vec<String>),
    Empty,
    Failed(crate::Error),
}

impl Retrieval {
    /// Collapse to the plain list contract, where a failure reads as no results.
    pub fn into_chunks(self) -> Vec<String> {
        match self {
            Self::Found(chunks) => chunks,
            Self::Empty | Self::Failed(_) => Vec::new(),
        }
    }
}
