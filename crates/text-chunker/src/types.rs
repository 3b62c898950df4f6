use serde::{Deserialize, Serialize};

/// Content-derived chunk identifier (`chunk-<16 hex chars>`)
pub type ChunkId = String;

/// A content-addressed unit of parsed text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextChunk {
    /// Identifier derived from the trimmed text content
    pub id: ChunkId,

    /// Trimmed chunk text
    pub text: String,

    /// Zero-based position in the original input order
    pub source_index: usize,
}

impl TextChunk {
    /// Create a chunk, deriving the id from the trimmed text
    #[must_use]
    pub fn new(text: impl Into<String>, source_index: usize) -> Self {
        let text = text.into();
        let id = crate::ids::deterministic_id(&text, "chunk");
        Self {
            id,
            text,
            source_index,
        }
    }
}

/// Boundary rule used to group lines into chunks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkMethod {
    /// New chunk on a blank line or a bullet marker
    #[default]
    Paragraph,
    /// New chunk on any bullet or numbered-list marker
    Bullet,
    /// Flush once the accumulated text ends with terminal punctuation
    Sentence,
}

impl ChunkMethod {
    /// Get human-readable name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Bullet => "bullet",
            Self::Sentence => "sentence",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_id_is_content_derived() {
        let a = TextChunk::new("same text", 0);
        let b = TextChunk::new("same text", 7);
        assert_eq!(a.id, b.id);
        assert_ne!(a.source_index, b.source_index);
    }

    #[test]
    fn test_chunk_id_differs_for_different_text() {
        let a = TextChunk::new("one thing", 0);
        let b = TextChunk::new("another thing", 0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_method_round_trips_through_serde() {
        let json = serde_json::to_string(&ChunkMethod::Bullet).unwrap();
        assert_eq!(json, "\"bullet\"");
        let back: ChunkMethod = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ChunkMethod::Bullet);
    }
}
