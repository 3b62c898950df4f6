use crate::embeddings::EmbeddingProvider;
use crate::error::{Result, StoreError};
use crate::kv::{BatchOp, KvStore};
use mindsplit_text_chunker::{ChunkId, TextChunk};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Store key for a chunk's cached embedding
#[must_use]
pub fn embedding_key(chunk_id: &str) -> String {
    format!("embedding:{chunk_id}")
}

/// Store key for a persisted chunk
#[must_use]
pub fn chunk_key(chunk_id: &str) -> String {
    format!("chunk:{chunk_id}")
}

/// Store key for a persisted session record
#[must_use]
pub fn session_key(session_id: &str) -> String {
    format!("session:{session_id}")
}

/// Cache accounting for one embedding pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingStats {
    /// Vectors computed by the provider in this pass
    pub computed: usize,
    /// Vectors served from the store
    pub cached: usize,
}

/// Resolve embeddings for `chunks`, computing only what the store lacks.
///
/// Every chunk id is first checked against its `embedding:` key; all
/// misses go to the provider in one `embed_batch` call, and the newly
/// computed vectors are persisted in a single atomic `batch` write. A
/// provider or store failure therefore caches nothing new. A cached
/// vector whose dimension does not match the provider is treated as a
/// miss and recomputed, so swapping models cannot serve stale geometry.
pub async fn chunk_embeddings(
    chunks: &[TextChunk],
    store: &dyn KvStore,
    provider: &dyn EmbeddingProvider,
) -> Result<(HashMap<ChunkId, Vec<f32>>, EmbeddingStats)> {
    let mut embeddings: HashMap<ChunkId, Vec<f32>> = HashMap::new();
    let mut missing: Vec<&TextChunk> = Vec::new();

    for chunk in chunks {
        if embeddings.contains_key(&chunk.id) || missing.iter().any(|c| c.id == chunk.id) {
            continue;
        }
        match store.get(&embedding_key(&chunk.id)).await? {
            Some(value) => match crate::kv::decode_vector(&value, provider.dimension()) {
                Some(vector) => {
                    embeddings.insert(chunk.id.clone(), vector);
                }
                None => missing.push(chunk),
            },
            None => missing.push(chunk),
        }
    }

    let cached = embeddings.len();
    let computed = missing.len();

    if !missing.is_empty() {
        let texts: Vec<String> = missing.iter().map(|c| c.text.clone()).collect();
        let vectors = provider.embed_batch(&texts).await?;
        if vectors.len() != missing.len() {
            return Err(StoreError::Embedding(format!(
                "provider '{}' returned {} vectors for {} texts",
                provider.id(),
                vectors.len(),
                missing.len()
            )));
        }

        let mut ops = Vec::with_capacity(vectors.len());
        for (chunk, vector) in missing.iter().zip(vectors.into_iter()) {
            ops.push(BatchOp::Set {
                key: embedding_key(&chunk.id),
                value: crate::kv::encode_vector(&vector),
            });
            embeddings.insert(chunk.id.clone(), vector);
        }
        store.batch(ops).await?;
    }

    log::debug!(
        "Embeddings resolved: {cached} cached, {computed} computed via '{}'",
        provider.id()
    );

    Ok((embeddings, EmbeddingStats { computed, cached }))
}
