//! Embedding storage and brute-force cosine similarity search.

use rusqlite::{params, Connection};

use triage_core::errors::TriageResult;
use triage_core::traits::ScoredExample;

use super::example_crud::{RawExample, EXAMPLE_COLUMNS};
use crate::to_storage_err;

/// Rank every example embedded by `model_name` against `query_embedding`.
///
/// Returns up to `limit` (example, cosine similarity) pairs, highest
/// similarity first. Equal scores keep insertion order. Zero-similarity
/// examples are kept so that a small store returns all of its examples.
pub fn search_vector(
    conn: &Connection,
    query_embedding: &[f32],
    model_name: &str,
    limit: usize,
) -> TriageResult<Vec<ScoredExample>> {
    if limit == 0 {
        return Ok(vec![]);
    }

    let mut stmt = conn
        .prepare(&format!(
            "SELECT {EXAMPLE_COLUMNS}, emb.embedding, emb.dimensions
             FROM examples e
             JOIN example_embeddings emb ON emb.example_id = e.id
             WHERE emb.model_name = ?1
             ORDER BY e.id"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![model_name], |row| {
            let raw = RawExample::from_row(row)?;
            let blob: Vec<u8> = row.get(7)?;
            let dims: i64 = row.get(8)?;
            Ok((raw, blob, dims))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let query_len = query_embedding.len();
    let mut scored: Vec<(RawExample, f64)> = Vec::new();
    for row in rows {
        let (raw, blob, dims) = row.map_err(|e| to_storage_err(e.to_string()))?;
        // Skip dimension mismatches without deserializing the vector.
        if dims as usize != query_len {
            continue;
        }
        let stored = bytes_to_f32_vec(&blob, query_len);
        let sim = cosine_similarity(query_embedding, &stored);
        // A corrupt vector scores NaN; rank it at the cosine floor.
        scored.push((raw, if sim.is_nan() { -1.0 } else { sim }));
    }

    // Stable sort: rows arrive in id order, so ties stay oldest-first.
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(limit);

    scored
        .into_iter()
        .map(|(raw, sim)| -> TriageResult<ScoredExample> { Ok((raw.into_example()?, sim)) })
        .collect()
}

/// Insert or replace the embedding for an example.
pub fn store_embedding(
    conn: &Connection,
    example_id: i64,
    embedding: &[f32],
    model_name: &str,
) -> TriageResult<()> {
    conn.execute(
        "INSERT INTO example_embeddings (example_id, embedding, dimensions, model_name)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(example_id) DO UPDATE SET
            embedding = excluded.embedding,
            dimensions = excluded.dimensions,
            model_name = excluded.model_name,
            created_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
        params![
            example_id,
            f32_vec_to_bytes(embedding),
            embedding.len() as i64,
            model_name
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Examples whose embedding is missing or was produced by another model or
/// dimension, oldest first. Returns (id, text) pairs.
pub fn stale_embeddings(
    conn: &Connection,
    model_name: &str,
    dimensions: usize,
    limit: usize,
) -> TriageResult<Vec<(i64, String)>> {
    let mut stmt = conn
        .prepare(
            "SELECT e.id, e.text
             FROM examples e
             LEFT JOIN example_embeddings emb ON emb.example_id = e.id
             WHERE emb.example_id IS NULL
                OR emb.model_name != ?1
                OR emb.dimensions != ?2
             ORDER BY e.id
             LIMIT ?3",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(
            params![model_name, dimensions as i64, limit as i64],
            |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Convert f32 slice to bytes (little-endian).
fn f32_vec_to_bytes(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Convert bytes back to f32 vec.
fn bytes_to_f32_vec(bytes: &[u8], expected_dims: usize) -> Vec<f32> {
    let mut result = Vec::with_capacity(expected_dims);
    for chunk in bytes.chunks_exact(4) {
        result.push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }
    result
}

/// Cosine similarity between two vectors. Zero when either has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (*x as f64) * (*y as f64))
        .sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
