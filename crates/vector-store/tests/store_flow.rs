use mindsplit_text_chunker::{parse_to_chunks, ChunkMethod};
use mindsplit_vector_store::{
    chunk_embeddings, embedding_key, BatchOp, FileStore, HashEmbedding, KvStore, MemoryStore,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

#[tokio::test]
async fn embeddings_survive_store_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mindsplit.json");
    let chunks = parse_to_chunks("alpha\n\nbeta", ChunkMethod::Paragraph);

    {
        let store = FileStore::open(&path).await.unwrap();
        let provider = HashEmbedding::new(24);
        let (_, stats) = chunk_embeddings(&chunks, &store, &provider).await.unwrap();
        assert_eq!(stats.computed, 2);
    }

    // A fresh process over the same file sees a warm cache.
    let store = FileStore::open(&path).await.unwrap();
    let provider = HashEmbedding::new(24);
    let (_, stats) = chunk_embeddings(&chunks, &store, &provider).await.unwrap();
    assert_eq!(stats.cached, 2);
    assert_eq!(stats.computed, 0);
    assert_eq!(provider.batch_calls(), 0);
}

#[tokio::test]
async fn search_finds_the_matching_chunk_embedding() {
    let store = MemoryStore::new();
    let provider = HashEmbedding::new(48);
    let chunks = parse_to_chunks("alpha\n\nbeta\n\ngamma", ChunkMethod::Paragraph);
    let (embeddings, _) = chunk_embeddings(&chunks, &store, &provider).await.unwrap();

    // Querying with a stored vector must return its own key first.
    let target = &chunks[1];
    let hits = store.search(&embeddings[&target.id], 3).await.unwrap();
    assert_eq!(hits[0].key, embedding_key(&target.id));
    assert!((hits[0].score - 1.0).abs() < 1e-5);
}

#[tokio::test]
async fn mixed_values_do_not_break_search() {
    let store = MemoryStore::new();
    store.set("note", json!({"kind": "session"})).await.unwrap();
    store
        .batch(vec![BatchOp::Set {
            key: "vec".into(),
            value: json!([1.0, 0.0]),
        }])
        .await
        .unwrap();

    let hits = store.search(&[1.0, 0.0], 5).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].key, "vec");
}
