use crate::error::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Output dimension of the built-in hash provider
pub const DEFAULT_DIMENSION: usize = 384;

/// Pluggable text-embedding capability.
///
/// A provider maps text to a fixed-dimension vector. Failures propagate
/// unmodified to the caller; the engine performs no implicit retry.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Stable identifier for the provider/model (e.g. `hash:d384`)
    fn id(&self) -> &str;

    /// Embedding dimensionality
    fn dimension(&self) -> usize;

    /// Compute embeddings for a batch of input texts, one vector per text
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Deterministic offline embedding provider.
///
/// Seeds an FNV-1a hash of the text, expands it with splitmix64, and
/// L2-normalizes the result. Identical text always embeds identically,
/// which makes it the reference provider for reproducibility tests; it
/// carries no semantic signal, so unrelated texts land near-orthogonal in
/// expectation. `batch_calls` counts `embed_batch` invocations so tests
/// can assert the cache's compute-at-most-once guarantee.
#[derive(Debug)]
pub struct HashEmbedding {
    id: String,
    dimension: usize,
    batch_calls: AtomicUsize,
}

impl HashEmbedding {
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self {
            id: format!("hash:d{dimension}"),
            dimension,
            batch_calls: AtomicUsize::new(0),
        }
    }

    /// Number of `embed_batch` calls served so far
    #[must_use]
    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::Relaxed)
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut state =
            fnv1a_64(text.as_bytes()) ^ (self.dimension as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        let mut vector = Vec::with_capacity(self.dimension);
        for _ in 0..self.dimension {
            let bits = splitmix64(&mut state);
            let high = (bits >> 32) as u32;
            let mantissa = high >> 9;
            let unit = f32::from_bits(0x3f80_0000 | mantissa) - 1.0;
            vector.push(unit.mul_add(2.0, -1.0));
        }
        normalize(&mut vector);
        vector
    }
}

impl Default for HashEmbedding {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbedding {
    fn id(&self) -> &str {
        &self.id
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.batch_calls.fetch_add(1, Ordering::Relaxed);
        Ok(texts.iter().map(|text| self.embed_one(text)).collect())
    }
}

fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

const fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn normalize(vector: &mut [f32]) {
    let norm: f32 = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in vector.iter_mut() {
            *v /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_identical_text_identical_vector() {
        let provider = HashEmbedding::new(64);
        let a = provider
            .embed_batch(&["same input".to_string()])
            .await
            .unwrap();
        let b = provider
            .embed_batch(&["same input".to_string()])
            .await
            .unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_vectors_are_normalized() {
        let provider = HashEmbedding::new(128);
        let vectors = provider
            .embed_batch(&["normalize me".to_string()])
            .await
            .unwrap();
        let norm: f32 = vectors[0].iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_dimension_is_respected() {
        let provider = HashEmbedding::new(17);
        let vectors = provider.embed_batch(&["dim".to_string()]).await.unwrap();
        assert_eq!(vectors[0].len(), 17);
        assert_eq!(provider.dimension(), 17);
        assert_eq!(provider.id(), "hash:d17");
    }

    #[tokio::test]
    async fn test_batch_calls_are_counted() {
        let provider = HashEmbedding::default();
        assert_eq!(provider.batch_calls(), 0);
        let _ = provider.embed_batch(&["one".to_string()]).await.unwrap();
        let _ = provider.embed_batch(&["two".to_string()]).await.unwrap();
        assert_eq!(provider.batch_calls(), 2);
    }

    #[tokio::test]
    async fn test_unrelated_texts_are_near_orthogonal() {
        let provider = HashEmbedding::default();
        let vectors = provider
            .embed_batch(&[
                "Fix the login bug.".to_string(),
                "Plan Q2 roadmap.".to_string(),
            ])
            .await
            .unwrap();
        let dot: f32 = vectors[0]
            .iter()
            .zip(vectors[1].iter())
            .map(|(a, b)| a * b)
            .sum();
        assert!(dot.abs() < 0.3, "hash vectors should not look similar: {dot}");
    }
}
