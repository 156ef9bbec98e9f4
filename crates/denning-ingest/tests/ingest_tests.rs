use denning_core::config::IngestSettings;
use denning_core::{ChunkingConfig, VectorStore};
use denning_embed::HashingEmbedder;
use denning_ingest::{IngestError, Ingestor};
use denning_vector::VectorDb;

fn ingestor(dir: &std::path::Path, chunking: ChunkingConfig) -> Ingestor {
    let store = VectorDb::open(dir, "uk_law_collection", Box::new(HashingEmbedder::new(128))).unwrap();
    Ingestor::new(Box::new(store), chunking, &IngestSettings::default()).unwrap()
}

fn page(body: &str) -> String {
    format!("<html><body><nav>Home</nav><div id=\"content\">{body}</div></body></html>")
}

#[test]
fn page_content_is_chunked_into_the_store() {
    let tmp = tempfile::tempdir().unwrap();
    let ingestor = ingestor(tmp.path(), ChunkingConfig::new(4, 1).unwrap());
    let words: Vec<String> = (0..10).map(|i| format!("<p>clause{i}</p>")).collect();

    let report = ingestor.ingest_html("https://www.legislation.gov.uk/ukpga/1968/60", &page(&words.concat())).unwrap();
    assert_eq!(report.chunks, 4);
    assert_eq!(report.ids, vec!["id_0", "id_1", "id_2", "id_3"]);
    assert_eq!(ingestor.store().count().unwrap(), 4);

    let hits = ingestor.store().query("clause0 clause1 clause2 clause3", 1).unwrap();
    assert_eq!(hits, vec!["clause0 clause1 clause2 clause3"]);
}

#[test]
fn second_document_continues_the_ids() {
    let tmp = tempfile::tempdir().unwrap();
    let ingestor = ingestor(tmp.path(), ChunkingConfig::default());
    ingestor.ingest_text("a", "first act text").unwrap();
    let report = ingestor.ingest_text("b", "second act text").unwrap();
    assert_eq!(report.ids, vec!["id_1"]);
}

#[test]
fn page_without_content_or_text_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let ingestor = ingestor(tmp.path(), ChunkingConfig::default());
    let missing = ingestor.ingest_html("u", "<html><body><p>elsewhere</p></body></html>");
    assert!(matches!(missing, Err(IngestError::ContentNotFound { .. })));
    let blank = ingestor.ingest_html("u", &page("<p>   </p>"));
    assert!(matches!(blank, Err(IngestError::EmptyDocument(_))));
    assert_eq!(ingestor.store().count().unwrap(), 0);
}

#[test]
fn invalid_url_is_rejected_without_writing() {
    let tmp = tempfile::tempdir().unwrap();
    let ingestor = ingestor(tmp.path(), ChunkingConfig::default());
    assert!(matches!(ingestor.ingest_url("legislation.gov.uk"), Err(IngestError::InvalidUrl(_))));
    assert_eq!(ingestor.store().count().unwrap(), 0);
}

#[test]
fn degenerate_chunking_is_rejected_up_front() {
    let tmp = tempfile::tempdir().unwrap();
    let store = VectorDb::open(tmp.path(), "c", Box::new(HashingEmbedder::new(16))).unwrap();
    let bad = ChunkingConfig { chunk_size: 10, overlap: 10 };
    assert!(matches!(Ingestor::new(Box::new(store), bad, &IngestSettings::default()), Err(IngestError::Core(_))));
}
