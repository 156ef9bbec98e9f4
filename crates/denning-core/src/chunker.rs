//! Word-window chunking.
//!
//! Text is split on whitespace and re-joined into windows of at most
//! `chunk_size` words. Consecutive windows share `overlap` words, so window
//! `i` starts at word `i * (chunk_size - overlap)`. Line breaks are not
//! preserved.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    pub chunk_size: usize,
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self { chunk_size: 500, overlap: 100 }
    }
}

impl ChunkingConfig {
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        let config = Self { chunk_size, overlap };
        config.validate()?;
        Ok(config)
    }

    /// Distance between the starts of consecutive windows.
    pub fn step(&self) -> Result<usize> {
        self.validate()?;
        Ok(self.chunk_size - self.overlap)
    }

    /// The window must advance by at least one word.
    pub fn validate(&self) -> Result<()> {
        if self.overlap >= self.chunk_size {
            return Err(Error::InvalidConfig(format!(
                "chunk overlap ({}) must be smaller than chunk size ({})",
                self.overlap, self.chunk_size
            )));
        }
        Ok(())
    }

    pub fn chunk(&self, text: &str) -> Result<Vec<String>> {
        let step = self.step()?;
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            return Ok(Vec::new());
        }
        let chunks: Vec<String> = (0..words.len())
            .step_by(step)
            .map(|start| {
                let end = (start + self.chunk_size).min(words.len());
                words[start..end].join(" ")
            })
            .collect();
        debug!(words = words.len(), chunks = chunks.len(), "Created {} chunks", chunks.len());
        Ok(chunks)
    }
}

/// Split `text` into overlapping word windows.
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Result<Vec<String>> {
    ChunkingConfig { chunk_size, overlap }.chunk(text)
}
