//! # MindSplit Vector Store
//!
//! Pluggable embedding capability plus the persistent key-value store
//! the partitioning engine runs against.
//!
//! ## Architecture
//!
//! ```text
//! TextChunk[]
//!     │
//!     ├──> Embedding Cache (content-hash keys, check-then-batch-write)
//!     │      └─> EmbeddingProvider (injected; HashEmbedding built in)
//!     │
//!     └──> KvStore capability
//!            ├─> get / set / delete / has
//!            ├─> batch (all-or-nothing multi-key writes)
//!            ├─> search (cosine nearest-neighbor over stored vectors)
//!            ├─> MemoryStore (tests, demos)
//!            └─> FileStore  (single JSON document, atomic rewrite)
//! ```
//!
//! The cache guarantees a chunk id is embedded at most once per store
//! lifetime: hits are read back, misses are embedded in one provider
//! batch, and all newly computed vectors land in a single `batch` write —
//! a provider failure caches nothing. The check-then-write sequence is
//! not atomic across concurrent callers; the engine assumes one logical
//! caller per session.
//!
//! ## Example
//!
//! ```rust
//! use mindsplit_text_chunker::{parse_to_chunks, ChunkMethod};
//! use mindsplit_vector_store::{chunk_embeddings, HashEmbedding, MemoryStore};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> mindsplit_vector_store::Result<()> {
//! let store = MemoryStore::new();
//! let provider = HashEmbedding::default();
//! let chunks = parse_to_chunks("alpha\n\nbeta", ChunkMethod::Paragraph);
//!
//! let (embeddings, stats) = chunk_embeddings(&chunks, &store, &provider).await?;
//! assert_eq!(embeddings.len(), 2);
//! assert_eq!(stats.computed, 2);
//!
//! // Second pass is served entirely from the cache.
//! let (_, stats) = chunk_embeddings(&chunks, &store, &provider).await?;
//! assert_eq!(stats.cached, 2);
//! # Ok(())
//! # }
//! ```

mod cache;
mod embeddings;
mod error;
mod file;
mod kv;

pub use cache::{chunk_embeddings, chunk_key, embedding_key, session_key, EmbeddingStats};
pub use embeddings::{EmbeddingProvider, HashEmbedding, DEFAULT_DIMENSION};
pub use error::{Result, StoreError};
pub use file::FileStore;
pub use kv::{BatchOp, KvStore, MemoryStore, VectorHit};
