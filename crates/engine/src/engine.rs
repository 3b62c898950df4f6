use crate::config::{CutAlgorithm, SplitConfig};
use crate::error::{EngineError, Result};
use crate::session::{now_ms, SessionRecord, StoredCut};
use crate::workstream::{
    build_workstreams, order_partitions, workstream_id, BleedingReport, Workstream,
    WorkstreamConnection,
};
use mindsplit_graph::{
    bleeding_edges, build_similarity_graph, partition_into, partition_into_randomized, NodeId,
    SeededRng,
};
use mindsplit_text_chunker::{deterministic_id, parse_to_chunks, TextChunk};
use mindsplit_vector_store::{
    chunk_embeddings, chunk_key, session_key, BatchOp, EmbeddingProvider, KvStore,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Run statistics returned alongside every split
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SplitStats {
    pub total_chunks: usize,
    pub total_edges: usize,
    pub cut_edges: usize,
    pub cut_weight: f32,

    /// Chunks freshly added by an incremental call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_chunks: Option<usize>,

    /// Embeddings reused from the store by an incremental call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached_embeddings: Option<usize>,
}

/// Everything a `split` or `add_and_resplit` call produces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitOutcome {
    pub session_id: String,
    pub workstreams: Vec<Workstream>,
    pub stats: SplitStats,
}

/// The semantic partitioning engine.
///
/// Wires chunking, cache-checked embedding, similarity-graph construction
/// and minimum-cut partitioning into `split` / `add_and_resplit`, and
/// persists each session so later calls can grow it incrementally. One
/// logical caller per session at a time; the engine does no locking of
/// its own beyond what the store provides.
pub struct SplitEngine {
    store: Arc<dyn KvStore>,
    provider: Arc<dyn EmbeddingProvider>,
    config: SplitConfig,
}

impl SplitEngine {
    /// Create an engine over a store and an embedding provider.
    /// Fails fast on an out-of-range configuration.
    pub fn new(
        store: Arc<dyn KvStore>,
        provider: Arc<dyn EmbeddingProvider>,
        config: SplitConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store,
            provider,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Full pipeline run over fresh text.
    ///
    /// The session id is derived from the text content, so splitting
    /// identical text always lands on (and refreshes) the same session.
    pub async fn split(&self, text: &str, parts: usize) -> Result<SplitOutcome> {
        let session_id = deterministic_id(text, "session");
        let chunks = dedup_chunks(parse_to_chunks(text, self.config.chunk_method));
        log::info!(
            "Splitting session {}: {} chunks into up to {} workstreams",
            session_id,
            chunks.len(),
            parts
        );
        self.run(session_id, chunks, parts, now_ms(), None).await
    }

    /// Merge new text into an existing session and re-partition.
    ///
    /// Chunks whose content-derived id the session already holds are
    /// dropped (re-adding identical text is a no-op), previously seen
    /// chunk ids reuse their cached embeddings, and the session record is
    /// updated in place — its chunk set only grows.
    pub async fn add_and_resplit(
        &self,
        session_id: &str,
        new_text: &str,
        parts: usize,
    ) -> Result<SplitOutcome> {
        let (record, mut chunks) = self.load_session(session_id).await?;

        let mut known: HashSet<String> = chunks.iter().map(|c| c.id.clone()).collect();
        let mut added = 0usize;
        for parsed in parse_to_chunks(new_text, self.config.chunk_method) {
            if !known.insert(parsed.id.clone()) {
                continue;
            }
            let source_index = chunks.len();
            chunks.push(TextChunk {
                id: parsed.id,
                text: parsed.text,
                source_index,
            });
            added += 1;
        }

        log::info!(
            "Resplitting session {}: {} existing + {} new chunks",
            session_id,
            chunks.len() - added,
            added
        );
        self.run(record.id, chunks, parts, record.created_at_ms, Some(added))
            .await
    }

    /// Cross-partition connection report for a previously computed split
    pub async fn bleeding_report(&self, session_id: &str) -> Result<BleedingReport> {
        let (record, _) = self.load_session(session_id).await?;
        let cut = record.last_result.ok_or_else(|| {
            EngineError::Corrupt(format!("session {session_id} has no stored result"))
        })?;

        let connections = bleeding_edges(&cut.partitions, &cut.cut_edges)
            .into_iter()
            .map(|group| WorkstreamConnection {
                between: (
                    workstream_id(group.partitions.0),
                    workstream_id(group.partitions.1),
                ),
                weight: group.edges.iter().map(|e| e.weight).sum(),
                edges: group.edges,
            })
            .collect();

        Ok(BleedingReport {
            session_id: record.id,
            cut_weight: cut.cut_weight,
            connections,
        })
    }

    async fn run(
        &self,
        session_id: String,
        chunks: Vec<TextChunk>,
        parts: usize,
        created_at_ms: u64,
        added: Option<usize>,
    ) -> Result<SplitOutcome> {
        let (embeddings, embed_stats) =
            chunk_embeddings(&chunks, self.store.as_ref(), self.provider.as_ref()).await?;

        let mut entries: Vec<(NodeId, Vec<f32>)> = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            let vector = embeddings.get(&chunk.id).cloned().ok_or_else(|| {
                EngineError::Corrupt(format!("no embedding resolved for chunk {}", chunk.id))
            })?;
            entries.push((chunk.id.clone(), vector));
        }

        let graph = build_similarity_graph(&entries, self.config.similarity_threshold)?;
        let cut = match self.config.algorithm {
            CutAlgorithm::Exact => partition_into(&graph, parts),
            CutAlgorithm::Randomized => {
                let mut rng = SeededRng::new(self.config.seed);
                partition_into_randomized(&graph, parts, &mut rng)
            }
        };

        let partitions = order_partitions(cut.partitions, &chunks);
        let workstreams = build_workstreams(&chunks, &partitions, &cut.cut_edges);

        let record = SessionRecord {
            id: session_id.clone(),
            chunk_ids: chunks.iter().map(|c| c.id.clone()).collect(),
            last_result: Some(StoredCut {
                requested_parts: parts,
                partitions,
                cut_edges: cut.cut_edges.clone(),
                cut_weight: cut.cut_weight,
            }),
            created_at_ms,
        };
        self.save_session(&record, &chunks).await?;

        log::info!(
            "Session {}: {} workstreams, cut weight {:.3}",
            session_id,
            workstreams.len(),
            cut.cut_weight
        );

        Ok(SplitOutcome {
            session_id,
            workstreams,
            stats: SplitStats {
                total_chunks: chunks.len(),
                total_edges: graph.edge_count(),
                cut_edges: cut.cut_edges.len(),
                cut_weight: cut.cut_weight,
                new_chunks: added,
                cached_embeddings: added.map(|_| embed_stats.cached),
            },
        })
    }

    /// Persist the session record and its chunks in one atomic batch
    async fn save_session(&self, record: &SessionRecord, chunks: &[TextChunk]) -> Result<()> {
        let mut ops = Vec::with_capacity(chunks.len() + 1);
        ops.push(BatchOp::Set {
            key: session_key(&record.id),
            value: serde_json::to_value(record)?,
        });
        for chunk in chunks {
            ops.push(BatchOp::Set {
                key: chunk_key(&chunk.id),
                value: serde_json::to_value(chunk)?,
            });
        }
        self.store.batch(ops).await?;
        Ok(())
    }

    async fn load_session(&self, session_id: &str) -> Result<(SessionRecord, Vec<TextChunk>)> {
        let value = self
            .store
            .get(&session_key(session_id))
            .await?
            .ok_or_else(|| EngineError::SessionNotFound(session_id.to_string()))?;
        let record: SessionRecord = serde_json::from_value(value)?;

        let mut chunks = Vec::with_capacity(record.chunk_ids.len());
        for chunk_id in &record.chunk_ids {
            let value = self.store.get(&chunk_key(chunk_id)).await?.ok_or_else(|| {
                EngineError::Corrupt(format!(
                    "missing chunk {chunk_id} for session {session_id}"
                ))
            })?;
            chunks.push(serde_json::from_value(value)?);
        }
        Ok((record, chunks))
    }
}

/// Collapse chunks that hash to the same id (identical text appearing
/// more than once in one input), keeping first occurrence order and
/// reassigning contiguous source indices.
fn dedup_chunks(parsed: Vec<TextChunk>) -> Vec<TextChunk> {
    let mut seen = HashSet::new();
    let mut out: Vec<TextChunk> = Vec::with_capacity(parsed.len());
    for chunk in parsed {
        if !seen.insert(chunk.id.clone()) {
            continue;
        }
        let source_index = out.len();
        out.push(TextChunk {
            id: chunk.id,
            text: chunk.text,
            source_index,
        });
    }
    out
}
