//! Embedding models for the vector index.
//!
//! `BgeM3Embedder` runs BGE-M3 locally with candle. `HashingEmbedder` is a
//! model-free fallback; `APP_USE_FAKE_EMBEDDINGS=1` forces it regardless of
//! configuration.

use anyhow::{Result, anyhow};
use std::path::{Path, PathBuf};
use tracing::info;

use denning_core::config::{expand_path, EmbeddingBackend, EmbeddingSettings};
use denning_core::Embedder;

mod device;
mod hashing;
mod model;
mod pool;
mod tokenize;

pub use device::select_device;
pub use hashing::HashingEmbedder;
pub use model::{BgeM3Embedder, BGE_M3_DIM};
pub use pool::masked_mean_l2;
pub use tokenize::tokenize_on_device;

pub fn fake_embeddings_forced() -> bool {
    std::env::var("APP_USE_FAKE_EMBEDDINGS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true")).unwrap_or(false)
}

pub fn embedder_from_settings(settings: &EmbeddingSettings) -> Result<Box<dyn Embedder>> {
    if fake_embeddings_forced() || settings.backend == EmbeddingBackend::Hashing {
        info!(dim = settings.dimension, "Using hashing embedder");
        return Ok(Box::new(HashingEmbedder::new(settings.dimension)));
    }
    let model_dir = resolve_model_dir(settings.model_dir.as_deref())?;
    Ok(Box::new(BgeM3Embedder::load(&model_dir, settings.max_len)?))
}

/// Locate the BGE-M3 files: `APP_MODEL_DIR`, `MODEL_DIR`, the configured
/// directory, then `models/bge-m3` under the working directory.
pub fn resolve_model_dir(configured: Option<&str>) -> Result<PathBuf> {
    let candidates = ["APP_MODEL_DIR", "MODEL_DIR"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .map(expand_path)
        .chain(configured.map(expand_path))
        .chain(std::iter::once(Path::new("models/bge-m3").to_path_buf()));
    for dir in candidates {
        if dir.exists() {
            info!("Using model dir: {}", dir.display());
            return Ok(dir);
        }
    }
    Err(anyhow!("Could not locate BGE-M3 model directory; set APP_MODEL_DIR or embedding.model_dir"))
}
