use mindsplit_graph::Edge;
use mindsplit_text_chunker::ChunkId;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Persisted session state, stored under `session:{id}`.
///
/// Chunk bodies live under their own `chunk:{chunk_id}` keys and
/// embeddings under `embedding:{chunk_id}`; the record only carries the
/// ordered id list. The chunk-id set only ever grows over a session's
/// lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Content-derived id of the text that opened the session
    pub id: String,

    /// Chunk ids in session order
    pub chunk_ids: Vec<ChunkId>,

    /// Most recent partitioning, if any
    pub last_result: Option<StoredCut>,

    /// Creation time, epoch milliseconds
    pub created_at_ms: u64,
}

/// The persisted outcome of the last partitioning run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCut {
    /// Group count the caller asked for
    pub requested_parts: usize,

    /// Chunk-id groups in reported (workstream) order
    pub partitions: Vec<Vec<ChunkId>>,

    /// Edges crossing partition boundaries
    pub cut_edges: Vec<Edge>,

    /// Summed weight of `cut_edges`
    pub cut_weight: f32,
}

/// Current wall-clock time as epoch milliseconds
#[must_use]
pub(crate) fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
