use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Graph node identifier. Contraction joins merged ids with `'+'`, so
/// ids fed into the algorithms must not contain that character
/// themselves (content-derived chunk ids never do).
pub type NodeId = String;

/// Undirected weighted edge between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,

    /// Cosine similarity of the endpoint embeddings
    pub weight: f32,
}

impl Edge {
    #[must_use]
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>, weight: f32) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }

    /// Check whether either endpoint is the given node
    #[must_use]
    pub fn touches(&self, node: &str) -> bool {
        self.source == node || self.target == node
    }

    /// The endpoint opposite to `node`, if `node` is an endpoint
    #[must_use]
    pub fn other_endpoint(&self, node: &str) -> Option<&str> {
        if self.source == node {
            Some(self.target.as_str())
        } else if self.target == node {
            Some(self.source.as_str())
        } else {
            None
        }
    }

    /// Check whether the edge connects `a` and `b` in either direction
    #[must_use]
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }
}

/// An undirected weighted graph as a pure value.
///
/// Node order is significant for determinism: algorithms iterate nodes in
/// list order and derived graphs preserve the order of the graph they
/// came from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<NodeId>,
    pub edges: Vec<Edge>,
}

impl Graph {
    #[must_use]
    pub fn new(nodes: Vec<NodeId>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Sum of all edge weights
    #[must_use]
    pub fn total_weight(&self) -> f32 {
        self.edges.iter().map(|e| e.weight).sum()
    }

    /// Merge nodes `a` and `b` into a composite node, returning a new graph.
    ///
    /// Edges between `a` and `b` are dropped entirely (not turned into
    /// self-loops); every other edge touching `a` or `b` is re-pointed at
    /// the composite id `"{a}+{b}"`. If redirection produces a second edge
    /// between the same endpoint pair, both are kept as parallel edges —
    /// this primitive never sums weights; any merge policy belongs to the
    /// caller.
    #[must_use]
    pub fn contract(&self, a: &str, b: &str) -> Self {
        let merged: NodeId = format!("{a}+{b}");

        let mut nodes: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|n| n.as_str() != a && n.as_str() != b)
            .cloned()
            .collect();
        nodes.push(merged.clone());

        let edges = self
            .edges
            .iter()
            .filter(|e| !e.connects(a, b))
            .map(|e| {
                let source = if e.source == a || e.source == b {
                    merged.clone()
                } else {
                    e.source.clone()
                };
                let target = if e.target == a || e.target == b {
                    merged.clone()
                } else {
                    e.target.clone()
                };
                Edge {
                    source,
                    target,
                    weight: e.weight,
                }
            })
            .collect();

        Self { nodes, edges }
    }

    /// New graph restricted to `keep` nodes and the edges among them.
    /// Node order follows this graph, not `keep`.
    #[must_use]
    pub fn induced_subgraph(&self, keep: &[NodeId]) -> Self {
        let keep_set: HashSet<&str> = keep.iter().map(String::as_str).collect();
        let nodes = self
            .nodes
            .iter()
            .filter(|n| keep_set.contains(n.as_str()))
            .cloned()
            .collect();
        let edges = self
            .edges
            .iter()
            .filter(|e| keep_set.contains(e.source.as_str()) && keep_set.contains(e.target.as_str()))
            .cloned()
            .collect();
        Self { nodes, edges }
    }
}

/// Outcome of a (two-way or N-way) minimum-cut partitioning.
///
/// Every node of the input graph appears in exactly one partition, and
/// `cut_weight` equals the summed weight of `cut_edges` — the edges whose
/// endpoints fall in different partitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinCutResult {
    pub partitions: Vec<Vec<NodeId>>,
    pub cut_edges: Vec<Edge>,
    pub cut_weight: f32,
}

impl MinCutResult {
    /// Degenerate result: the whole node set as one partition, no cut.
    /// An empty node set yields zero partitions rather than one empty one.
    #[must_use]
    pub fn single(nodes: Vec<NodeId>) -> Self {
        let partitions = if nodes.is_empty() { vec![] } else { vec![nodes] };
        Self {
            partitions,
            cut_edges: Vec::new(),
            cut_weight: 0.0,
        }
    }
}

/// Cut edges grouped by the unordered pair of partition indices they connect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartitionPairEdges {
    /// Partition indices, stored `(low, high)`
    pub partitions: (usize, usize),
    pub edges: Vec<Edge>,
}
