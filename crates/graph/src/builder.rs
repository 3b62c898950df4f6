use crate::error::{GraphError, Result};
use crate::types::{Edge, Graph, NodeId};

/// Cosine similarity between two vectors.
///
/// Zero-magnitude vectors compare as `0.0`, not an error; mismatched
/// dimensions are a [`GraphError::DimensionMismatch`].
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(GraphError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot / (norm_a * norm_b))
}

/// Build the weighted similarity graph over embedded chunks.
///
/// Every unordered pair of entries is compared; an edge is created only
/// when cosine similarity reaches `threshold`. No self-loops, at most one
/// edge per pair. Node order follows `entries`.
pub fn build_similarity_graph(entries: &[(NodeId, Vec<f32>)], threshold: f32) -> Result<Graph> {
    let nodes: Vec<NodeId> = entries.iter().map(|(id, _)| id.clone()).collect();
    let mut edges = Vec::new();

    for i in 0..entries.len() {
        for j in (i + 1)..entries.len() {
            let similarity = cosine_similarity(&entries[i].1, &entries[j].1)?;
            if similarity >= threshold {
                edges.push(Edge::new(
                    entries[i].0.clone(),
                    entries[j].0.clone(),
                    similarity,
                ));
            }
        }
    }

    log::info!(
        "Built similarity graph: {} nodes, {} edges (threshold {})",
        nodes.len(),
        edges.len(),
        threshold
    );

    Ok(Graph::new(nodes, edges))
}
