use mindsplit_graph::Edge;
use mindsplit_text_chunker::{ChunkId, TextChunk};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Externally visible output group: ordered chunks plus the residual
/// connections into other workstreams
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workstream {
    /// Stable id within one result (`ws-1`, `ws-2`, …)
    pub id: String,

    /// Display name (`Workstream 1`, …)
    pub name: String,

    /// Member chunks, ordered by `source_index`
    pub chunks: Vec<TextChunk>,

    /// Cut edges touching this workstream, seen from its side
    pub bleeding_edges: Vec<BleedingEdge>,
}

/// A cut edge reinterpreted from one workstream's point of view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BleedingEdge {
    pub edge: Edge,

    /// Id of the workstream on the far side
    pub connected_to: String,

    /// Endpoint chunk inside this workstream
    pub source_chunk: ChunkId,

    /// Endpoint chunk inside the other workstream
    pub target_chunk: ChunkId,
}

/// Cross-partition connection report for a whole session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BleedingReport {
    pub session_id: String,

    /// Total weight of all cut edges in the last split
    pub cut_weight: f32,

    pub connections: Vec<WorkstreamConnection>,
}

/// All bleeding edges between one unordered pair of workstreams
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkstreamConnection {
    /// Workstream ids, lower partition index first
    pub between: (String, String),

    /// Summed weight of `edges`
    pub weight: f32,

    pub edges: Vec<Edge>,
}

/// Workstream id for a partition index
#[must_use]
pub(crate) fn workstream_id(index: usize) -> String {
    format!("ws-{}", index + 1)
}

/// Order partitions by the smallest `source_index` they contain, so
/// workstream numbering is stable for a given input.
pub(crate) fn order_partitions(
    partitions: Vec<Vec<ChunkId>>,
    chunks: &[TextChunk],
) -> Vec<Vec<ChunkId>> {
    let position: HashMap<&str, usize> = chunks
        .iter()
        .map(|c| (c.id.as_str(), c.source_index))
        .collect();

    let mut ordered = partitions;
    ordered.sort_by_key(|partition| {
        partition
            .iter()
            .filter_map(|id| position.get(id.as_str()).copied())
            .min()
            .unwrap_or(usize::MAX)
    });
    ordered
}

/// Materialize workstreams from ordered partitions and the cut edge list
pub(crate) fn build_workstreams(
    chunks: &[TextChunk],
    partitions: &[Vec<ChunkId>],
    cut_edges: &[Edge],
) -> Vec<Workstream> {
    let by_id: HashMap<&str, &TextChunk> = chunks.iter().map(|c| (c.id.as_str(), c)).collect();
    let membership: HashMap<&str, usize> = partitions
        .iter()
        .enumerate()
        .flat_map(|(index, ids)| ids.iter().map(move |id| (id.as_str(), index)))
        .collect();

    partitions
        .iter()
        .enumerate()
        .map(|(index, ids)| {
            let mut members: Vec<TextChunk> = ids
                .iter()
                .filter_map(|id| by_id.get(id.as_str()).copied().cloned())
                .collect();
            members.sort_by_key(|c| c.source_index);

            let bleeding_edges = cut_edges
                .iter()
                .filter_map(|edge| {
                    let source_side = membership.get(edge.source.as_str()).copied()?;
                    let target_side = membership.get(edge.target.as_str()).copied()?;
                    if source_side == target_side {
                        None
                    } else if source_side == index {
                        Some(BleedingEdge {
                            edge: edge.clone(),
                            connected_to: workstream_id(target_side),
                            source_chunk: edge.source.clone(),
                            target_chunk: edge.target.clone(),
                        })
                    } else if target_side == index {
                        Some(BleedingEdge {
                            edge: edge.clone(),
                            connected_to: workstream_id(source_side),
                            source_chunk: edge.target.clone(),
                            target_chunk: edge.source.clone(),
                        })
                    } else {
                        None
                    }
                })
                .collect();

            Workstream {
                id: workstream_id(index),
                name: format!("Workstream {}", index + 1),
                chunks: members,
                bleeding_edges,
            }
        })
        .collect()
}
