use crate::error::Result;
use crate::kv::{apply_ops, scan_vectors, validate_key, BatchOp, KvStore, VectorHit};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// File-backed store: one JSON document, rewritten atomically.
///
/// The document is loaded once at open and mirrored in memory for reads.
/// Every mutation persists to a temp file and renames it over the target
/// before the in-memory mirror is updated, so a failed write — including
/// a failed operation inside `batch` — leaves both the file and the
/// mirror in their previous state.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, Value>>,
}

impl FileStore {
    /// Open a store at `path`, loading the existing document if present
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(data) => serde_json::from_str(&data)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        log::info!(
            "Opened file store at {:?} ({} keys)",
            path,
            entries.len()
        );
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    async fn persist(&self, entries: &HashMap<String, Value>) -> Result<()> {
        let data = serde_json::to_string(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&tmp, data.as_bytes()).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl KvStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        validate_key(key)?;
        let mut entries = self.entries.write().await;
        let mut staged = entries.clone();
        staged.insert(key.to_string(), value);
        self.persist(&staged).await?;
        *entries = staged;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut entries = self.entries.write().await;
        if !entries.contains_key(key) {
            return Ok(false);
        }
        let mut staged = entries.clone();
        staged.remove(key);
        self.persist(&staged).await?;
        *entries = staged;
        Ok(true)
    }

    async fn has(&self, key: &str) -> Result<bool> {
        Ok(self.entries.read().await.contains_key(key))
    }

    async fn batch(&self, ops: Vec<BatchOp>) -> Result<()> {
        let mut entries = self.entries.write().await;
        let mut staged = entries.clone();
        apply_ops(&mut staged, &ops)?;
        self.persist(&staged).await?;
        *entries = staged;
        Ok(())
    }

    async fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<VectorHit>> {
        Ok(scan_vectors(&*self.entries.read().await, query, top_k))
    }
}
