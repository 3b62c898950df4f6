//! # MindSplit Graph
//!
//! Weighted similarity graphs over chunk ids and the minimum-cut
//! algorithms that partition them.
//!
//! ## Architecture
//!
//! ```text
//! (chunk id, embedding)[]
//!     │
//!     ├──> Similarity Builder (pairwise cosine, threshold filter)
//!     │      └─> Graph { nodes, edges }   — a pure value
//!     │
//!     ├──> Stoer–Wagner (exact two-way cut, deterministic)
//!     │      └─> recursive bisection for N-way partitioning
//!     │
//!     ├──> Karger contraction (seeded, single-pass heuristic)
//!     │
//!     └──> Bleeding edges (cut edges grouped per partition pair)
//! ```
//!
//! Graphs are never mutated in place: contraction and induced subgraphs
//! build new node/edge lists, so recursive bisection is free of shared
//! mutable state. All randomness flows through an explicit [`SeededRng`]
//! value, never process-wide RNG state.

mod builder;
mod error;
mod mincut;
mod rng;
mod types;

pub use builder::{build_similarity_graph, cosine_similarity};
pub use error::{GraphError, Result};
pub use mincut::{
    bleeding_edges, karger_cut, partition_into, partition_into_randomized, stoer_wagner,
};
pub use rng::SeededRng;
pub use types::{Edge, Graph, MinCutResult, NodeId, PartitionPairEdges};
