use crate::error::{EngineError, Result};
use mindsplit_text_chunker::ChunkMethod;
use serde::{Deserialize, Serialize};

/// Which minimum-cut composition drives the N-way partitioning
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutAlgorithm {
    /// Stoer–Wagner bisection: exact and deterministic
    #[default]
    Exact,
    /// Seeded Karger contraction: a fast single-pass heuristic whose
    /// result is reproducible for a fixed seed but not verified minimal
    Randomized,
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Minimum cosine similarity for a graph edge
    pub similarity_threshold: f32,

    /// Seed for the randomized cut path
    pub seed: u32,

    /// Chunk boundary rule
    pub chunk_method: ChunkMethod,

    /// Cut composition to run
    pub algorithm: CutAlgorithm,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.3,
            seed: 42,
            chunk_method: ChunkMethod::Paragraph,
            algorithm: CutAlgorithm::Exact,
        }
    }
}

impl SplitConfig {
    /// Reject out-of-range values before any pipeline work happens
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(EngineError::InvalidConfig(format!(
                "similarity_threshold must be within [0, 1], got {}",
                self.similarity_threshold
            )));
        }
        Ok(())
    }
}
