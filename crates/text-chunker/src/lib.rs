//! # MindSplit Text Chunker
//!
//! Splits raw text into ordered, content-addressed semantic units.
//!
//! ## Architecture
//!
//! ```text
//! Raw Text
//!     │
//!     ├──> Line Accumulation (paragraph | bullet | sentence boundaries)
//!     │
//!     └──> Chunk Emission
//!          ├─> Trim + drop whitespace-only accumulations
//!          ├─> Content-derived id (truncated SHA-256)
//!          └─> Emit TextChunk[] ordered by source_index
//! ```
//!
//! Chunk ids are derived from trimmed content, never generated randomly:
//! identical text always yields the identical id, which is what makes
//! embedding caching and idempotent re-splits safe downstream.
//!
//! ## Example
//!
//! ```rust
//! use mindsplit_text_chunker::{parse_to_chunks, ChunkMethod};
//!
//! let text = "Fix the login bug.\n\nReview dashboard mockups.";
//! let chunks = parse_to_chunks(text, ChunkMethod::Paragraph);
//!
//! assert_eq!(chunks.len(), 2);
//! assert_eq!(chunks[0].source_index, 0);
//! assert!(chunks[0].id.starts_with("chunk-"));
//! ```

mod chunker;
mod ids;
mod types;

pub use chunker::parse_to_chunks;
pub use ids::deterministic_id;
pub use types::{ChunkId, ChunkMethod, TextChunk};
