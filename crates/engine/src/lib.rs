//! # MindSplit Engine
//!
//! Orchestrates the full semantic partitioning pipeline and owns the
//! session model for incremental re-splits.
//!
//! ## Architecture
//!
//! ```text
//! split(text, n) / add_and_resplit(session, text, n)
//!     │
//!     ├──> text-chunker        (content-addressed chunks)
//!     ├──> vector-store        (cache-checked embeddings, one batch write)
//!     ├──> graph               (similarity graph → N-way minimum cut)
//!     │
//!     ├──> Workstream formatting (chunks in source order + bleeding edges)
//!     └──> Session persistence   (session + chunks in one atomic batch)
//! ```
//!
//! Sessions are keyed by a content-derived id, so splitting identical
//! text lands on the same session. A session's chunk-id set only grows:
//! `add_and_resplit` drops chunks whose content the session has already
//! seen, reuses every cached embedding, and re-partitions the combined
//! set. Determinism: same text, seed, and embedding provider always
//! produce the same workstreams.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use mindsplit_engine::{SplitConfig, SplitEngine};
//! use mindsplit_vector_store::{HashEmbedding, MemoryStore};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> mindsplit_engine::Result<()> {
//! let engine = SplitEngine::new(
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(HashEmbedding::default()),
//!     SplitConfig::default(),
//! )?;
//!
//! let outcome = engine
//!     .split("Fix the login bug.\n\nPlan Q2 roadmap.", 2)
//!     .await?;
//! assert_eq!(outcome.stats.total_chunks, 2);
//! # Ok(())
//! # }
//! ```

mod config;
mod engine;
mod error;
mod session;
mod workstream;

pub use config::{CutAlgorithm, SplitConfig};
pub use engine::{SplitEngine, SplitOutcome, SplitStats};
pub use error::{EngineError, Result};
pub use session::{SessionRecord, StoredCut};
pub use workstream::{BleedingEdge, BleedingReport, Workstream, WorkstreamConnection};
