use anyhow::{Result, ensure};
use arrow_array::{FixedSizeListArray, RecordBatch, RecordBatchIterator, StringArray, TimestampMillisecondArray};
use lancedb::Table;
use std::sync::Arc;

use crate::schema::build_arrow_schema;

/// One row of a collection table.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub id: String,
    pub content: String,
    pub source: String,
    pub ingested_at: i64,
    pub vector: Vec<f32>,
}

pub fn entries_to_record_batch(entries: &[IndexEntry], dim: i32) -> Result<RecordBatch> {
    let mut ids = Vec::with_capacity(entries.len());
    let mut contents = Vec::with_capacity(entries.len());
    let mut sources = Vec::with_capacity(entries.len());
    let mut times = Vec::with_capacity(entries.len());
    let mut vectors: Vec<Option<Vec<Option<f32>>>> = Vec::with_capacity(entries.len());
    for e in entries {
        ensure!(e.vector.len() == dim as usize, "dim mismatch for {}: got {} expected {}", e.id, e.vector.len(), dim);
        ids.push(e.id.clone());
        contents.push(e.content.clone());
        sources.push(e.source.clone());
        times.push(e.ingested_at);
        vectors.push(Some(e.vector.iter().map(|&x| Some(x)).collect()));
    }
    let record_batch = RecordBatch::try_new(
        build_arrow_schema(dim),
        vec![
            Arc::new(StringArray::from(ids)),
            Arc::new(StringArray::from(contents)),
            Arc::new(StringArray::from(sources)),
            Arc::new(TimestampMillisecondArray::from(times)),
            Arc::new(FixedSizeListArray::from_iter_primitive::<arrow_array::types::Float32Type, _, _>(vectors.into_iter(), dim)),
        ],
    )?;
    Ok(record_batch)
}

/// Append all entries in a single write.
pub async fn insert_entries(table: &Table, entries: &[IndexEntry], dim: i32) -> Result<()> {
    if entries.is_empty() { return Ok(()); }
    let record_batch = entries_to_record_batch(entries, dim)?;
    let schema = record_batch.schema();
    let reader = Box::new(RecordBatchIterator::new(vec![Ok(record_batch)].into_iter(), schema));
    table.add(reader).execute().await?;
    Ok(())
}
