use anyhow::{Result, anyhow};
use arrow_array::{Float32Array, StringArray};
use futures::TryStreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};
use lancedb::{DistanceType, Table};

#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub content: String,
    /// Cosine distance; smaller is more similar.
    pub distance: f32,
}

/// Nearest `limit` rows to `query_vec` by cosine distance, closest first.
pub async fn search_nearest(table: &Table, query_vec: Vec<f32>, limit: usize) -> Result<Vec<ScoredChunk>> {
    let mut stream = table
        .vector_search(query_vec)?
        .distance_type(DistanceType::Cosine)
        .limit(limit)
        .execute()
        .await?;
    let mut hits = Vec::new();
    while let Some(batch) = stream.try_next().await? {
        let contents = batch
            .column_by_name("content")
            .and_then(|c| c.as_any().downcast_ref::<StringArray>())
            .ok_or_else(|| anyhow!("content column missing from search results"))?;
        let distances = batch
            .column_by_name("_distance")
            .and_then(|c| c.as_any().downcast_ref::<Float32Array>())
            .ok_or_else(|| anyhow!("_distance column missing from search results"))?;
        for i in 0..batch.num_rows() {
            hits.push(ScoredChunk { content: contents.value(i).to_string(), distance: distances.value(i) });
        }
    }
    // Stable sort keeps the engine's order among equal distances.
    hits.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(std::cmp::Ordering::Equal));
    hits.truncate(limit);
    Ok(hits)
}
