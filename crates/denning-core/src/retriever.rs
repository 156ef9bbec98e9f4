use tracing::error;

use crate::traits::VectorStore;
use crate::types::Retrieval;

pub const DEFAULT_RETRIEVAL_RESULTS: usize = 5;

/// Top-K retrieval over a [`VectorStore`].
pub struct Retriever {
    store: Box<dyn VectorStore>,
    n_results: usize,
}

impl Retriever {
    pub fn new(store: Box<dyn VectorStore>, n_results: usize) -> Self {
        Self { store, n_results }
    }

    pub fn store(&self) -> &dyn VectorStore {
        self.store.as_ref()
    }

    pub fn retrieve(&self, question: &str) -> Retrieval {
        match self.store.query(question, self.n_results) {
            Ok(chunks) if chunks.is_empty() => Retrieval::Empty,
            Ok(chunks) => Retrieval::Found(chunks),
            Err(e) => {
                error!("Failed to query vector index: {e}");
                Retrieval::Failed(e)
            }
        }
    }

    /// Plain list contract: an empty list both when nothing matched and when
    /// the search failed.
    pub fn query(&self, search_text: &str, n_results: usize) -> Vec<String> {
        match self.store.query(search_text, n_results) {
            Ok(chunks) => chunks,
            Err(e) => {
                error!("Failed to query vector index: {e}");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChunkId;
    use crate::{Error, Result};

    struct FixedStore(Option<Vec<String>>);

    impl VectorStore for FixedStore {
        fn count(&self) -> Result<usize> {
            Ok(self.0.as_ref().map_or(0, Vec::len))
        }
        fn add_documents_from(&self, _source: &str, _chunks: &[String]) -> Result<Vec<ChunkId>> {
            Ok(Vec::new())
        }
        fn query(&self, _search_text: &str, n_results: usize) -> Result<Vec<String>> {
            match &self.0 {
                Some(all) => Ok(all.iter().take(n_results).cloned().collect()),
                None => Err(Error::Storage("table is gone".into())),
            }
        }
    }

    #[test]
    fn retrieve_tags_each_outcome() {
        let found = Retriever::new(Box::new(FixedStore(Some(vec!["a".into(), "b".into(), "c".into()]))), 2);
        assert!(matches!(found.retrieve("q"), Retrieval::Found(v) if v == vec!["a", "b"]));

        let empty = Retriever::new(Box::new(FixedStore(Some(Vec::new()))), 5);
        assert!(matches!(empty.retrieve("q"), Retrieval::Empty));

        let failed = Retriever::new(Box::new(FixedStore(None)), 5);
        assert!(matches!(failed.retrieve("q"), Retrieval::Failed(Error::Storage(_))));
    }

    #[test]
    fn plain_query_swallows_failures() {
        let failed = Retriever::new(Box::new(FixedStore(None)), 5);
        assert!(failed.query("q", 3).is_empty());
        let found = Retriever::new(Box::new(FixedStore(Some(vec!["a".into()]))), 5);
        assert_eq!(found.query("q", 3), vec!["a"]);
    }
}
