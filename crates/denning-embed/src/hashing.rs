use anyhow::Result;
use std::hash::{Hash, Hasher};
use twox_hash::XxHash64;

use denning_core::Embedder;

/// Deterministic hashed bag-of-words embedder.
///
/// Each lowercased token adds weight to the bucket its xxHash64 selects; the
/// result is L2-normalized. Texts sharing vocabulary land close together,
/// identical texts land on the same vector. No model files are needed, so it
/// serves offline runs and tests.
pub struct HashingEmbedder { dim: usize }

impl HashingEmbedder {
    pub fn new(dim: usize) -> Self { Self { dim } }

    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0f32; self.dim];
        if self.dim == 0 { return v; }
        for token in text.split_whitespace() {
            let token = token.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase();
            if token.is_empty() { continue; }
            let mut hasher = XxHash64::with_seed(0);
            token.hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h % self.dim as u64) as usize;
            let val = 0.5 + ((h >> 32) as u32 as f32) / (u32::MAX as f32);
            v[idx] += val;
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt().max(1e-6);
        for x in &mut v { *x /= norm; }
        v
    }
}

impl Embedder for HashingEmbedder {
    fn dim(&self) -> usize { self.dim }
    fn max_len(&self) -> usize { usize::MAX }
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cosine(a: &[f32], b: &[f32]) -> f32 { a.iter().zip(b).map(|(x, y)| x * y).sum() }

    #[test]
    fn punctuation_and_case_do_not_change_tokens() {
        let e = HashingEmbedder::new(64);
        assert_eq!(e.embed_text("Theft Act, 1968."), e.embed_text("theft act 1968"));
    }

    #[test]
    fn shared_vocabulary_scores_higher() {
        let e = HashingEmbedder::new(1024);
        let q = e.embed_text("dishonest appropriation of property");
        let near = e.embed_text("a person is guilty of theft if he dishonestly appropriates property");
        let far = e.embed_text("the speed limit on motorways is seventy miles per hour");
        assert!(cosine(&q, &near) > cosine(&q, &far));
    }
}
