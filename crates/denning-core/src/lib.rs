//! Core of the Denning retrieval pipeline: chunking, prompt templating, the
//! vector-store contract and configuration.

pub mod chunker;
pub mod config;
pub mod error;
pub mod retriever;
pub mod template;
pub mod traits;
pub mod types;

pub use chunker::{chunk_text, ChunkingConfig};
pub use config::{Config, Settings};
pub use error::{Error, Result};
pub use retriever::Retriever;
pub use template::{PromptTemplate, TemplateError};
pub use traits::{Embedder, VectorStore};
pub use types::{ChunkId, Retrieval};
