use crate::error::{Result, StoreError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// A single operation inside an atomic batch write
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum BatchOp {
    Set { key: String, value: Value },
    Delete { key: String },
}

impl BatchOp {
    fn key(&self) -> &str {
        match self {
            Self::Set { key, .. } | Self::Delete { key } => key,
        }
    }
}

/// Nearest-neighbor search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorHit {
    pub key: String,
    pub score: f32,
}

/// Persistent key-value capability required by the partitioning engine.
///
/// `batch` is all-or-nothing: when any operation is rejected, none of the
/// batch takes effect, so callers can retry without partial corruption.
/// `search` runs cosine nearest-neighbor over every stored value that
/// decodes as a vector of the query's dimension.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>>;
    async fn set(&self, key: &str, value: Value) -> Result<()>;
    async fn delete(&self, key: &str) -> Result<bool>;
    async fn has(&self, key: &str) -> Result<bool>;
    async fn batch(&self, ops: Vec<BatchOp>) -> Result<()>;
    async fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<VectorHit>>;
}

/// In-memory store for tests and demos
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        validate_key(key)?;
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.entries.write().await.remove(key).is_some())
    }

    async fn has(&self, key: &str) -> Result<bool> {
        Ok(self.entries.read().await.contains_key(key))
    }

    async fn batch(&self, ops: Vec<BatchOp>) -> Result<()> {
        let mut entries = self.entries.write().await;
        // Stage on a copy so a rejected op leaves the live map untouched.
        let mut staged = entries.clone();
        apply_ops(&mut staged, &ops)?;
        *entries = staged;
        Ok(())
    }

    async fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<VectorHit>> {
        Ok(scan_vectors(&*self.entries.read().await, query, top_k))
    }
}

/// Validate and apply batch operations to a staged map
pub(crate) fn apply_ops(staged: &mut HashMap<String, Value>, ops: &[BatchOp]) -> Result<()> {
    for op in ops {
        validate_key(op.key())?;
    }
    for op in ops {
        match op {
            BatchOp::Set { key, value } => {
                staged.insert(key.clone(), value.clone());
            }
            BatchOp::Delete { key } => {
                staged.remove(key);
            }
        }
    }
    Ok(())
}

pub(crate) fn validate_key(key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(StoreError::BatchRejected("empty key".to_string()));
    }
    Ok(())
}

/// Cosine scan over every entry that decodes as a `query`-length vector
pub(crate) fn scan_vectors(
    entries: &HashMap<String, Value>,
    query: &[f32],
    top_k: usize,
) -> Vec<VectorHit> {
    let mut hits: Vec<VectorHit> = entries
        .iter()
        .filter_map(|(key, value)| {
            let vector = decode_vector(value, query.len())?;
            Some(VectorHit {
                key: key.clone(),
                score: cosine(query, &vector),
            })
        })
        .collect();
    hits.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.key.cmp(&b.key)));
    hits.truncate(top_k);
    hits
}

/// Encode a vector as a JSON array value
#[must_use]
pub(crate) fn encode_vector(vector: &[f32]) -> Value {
    Value::Array(
        vector
            .iter()
            .map(|v| Value::from(f64::from(*v)))
            .collect(),
    )
}

/// Decode a JSON value into a vector of the expected dimension
#[must_use]
pub(crate) fn decode_vector(value: &Value, expected_dimension: usize) -> Option<Vec<f32>> {
    let items = value.as_array()?;
    if items.len() != expected_dimension {
        return None;
    }
    let mut vector = Vec::with_capacity(items.len());
    for item in items {
        vector.push(item.as_f64()? as f32);
    }
    Some(vector)
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
