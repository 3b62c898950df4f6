use async_trait::async_trait;
use mindsplit_engine::{CutAlgorithm, EngineError, SplitConfig, SplitEngine};
use mindsplit_text_chunker::{parse_to_chunks, ChunkMethod};
use mindsplit_vector_store::{
    EmbeddingProvider, FileStore, HashEmbedding, MemoryStore, Result as StoreResult,
};
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::sync::Arc;
use tempfile::TempDir;

const SCENARIO: &str = "Fix the login bug.\n\nReview dashboard mockups.\n\nPlan Q2 roadmap.";

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn default_engine() -> SplitEngine {
    SplitEngine::new(
        Arc::new(MemoryStore::new()),
        Arc::new(HashEmbedding::default()),
        SplitConfig::default(),
    )
    .unwrap()
}

/// Two-dimensional provider with fixed directions per topic keyword, so
/// tests can force known similarity structure.
struct KeywordProvider;

#[async_trait]
impl EmbeddingProvider for KeywordProvider {
    fn id(&self) -> &str {
        "keyword:d2"
    }

    fn dimension(&self) -> usize {
        2
    }

    async fn embed_batch(&self, texts: &[String]) -> StoreResult<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|text| {
                if text.contains("login") {
                    vec![1.0, 0.0]
                } else if text.contains("password") {
                    vec![0.9, 0.1]
                } else {
                    vec![0.6, 0.8]
                }
            })
            .collect())
    }
}

#[tokio::test]
async fn three_unrelated_paragraphs_become_three_singleton_workstreams() {
    init_logging();
    let engine = default_engine();

    let outcome = engine.split(SCENARIO, 3).await.unwrap();

    assert_eq!(outcome.workstreams.len(), 3);
    assert!(outcome.workstreams.iter().all(|w| w.chunks.len() == 1));
    assert!(outcome
        .workstreams
        .iter()
        .all(|w| w.bleeding_edges.is_empty()));
    assert_eq!(outcome.stats.total_chunks, 3);
    assert_eq!(outcome.stats.cut_edges, 0);
    assert_eq!(outcome.stats.cut_weight, 0.0);
}

#[tokio::test]
async fn no_chunk_is_lost_or_duplicated() {
    let engine = default_engine();
    let outcome = engine.split(SCENARIO, 2).await.unwrap();

    let expected: HashSet<String> = parse_to_chunks(SCENARIO, ChunkMethod::Paragraph)
        .into_iter()
        .map(|c| c.id)
        .collect();

    let mut returned = Vec::new();
    for workstream in &outcome.workstreams {
        for chunk in &workstream.chunks {
            returned.push(chunk.id.clone());
        }
    }

    let unique: HashSet<String> = returned.iter().cloned().collect();
    assert_eq!(unique.len(), returned.len(), "no id may repeat");
    assert_eq!(unique, expected, "exactly the chunker's ids come back");
}

#[tokio::test]
async fn identical_inputs_give_identical_partitions() {
    let first = default_engine().split(SCENARIO, 2).await.unwrap();
    let second = default_engine().split(SCENARIO, 2).await.unwrap();

    let sets = |outcome: &mindsplit_engine::SplitOutcome| -> Vec<Vec<String>> {
        outcome
            .workstreams
            .iter()
            .map(|w| {
                let mut ids: Vec<String> = w.chunks.iter().map(|c| c.id.clone()).collect();
                ids.sort();
                ids
            })
            .collect()
    };

    assert_eq!(first.session_id, second.session_id);
    assert_eq!(sets(&first), sets(&second));
}

#[tokio::test]
async fn one_part_returns_a_single_workstream_with_no_cut() {
    let engine = default_engine();
    let outcome = engine.split(SCENARIO, 1).await.unwrap();

    assert_eq!(outcome.workstreams.len(), 1);
    assert_eq!(outcome.workstreams[0].chunks.len(), 3);
    assert!(outcome.workstreams[0].bleeding_edges.is_empty());
    assert_eq!(outcome.stats.cut_edges, 0);
}

#[tokio::test]
async fn incremental_resplit_reuses_cached_embeddings() {
    let store = Arc::new(MemoryStore::new());
    let provider = Arc::new(HashEmbedding::default());
    let engine = SplitEngine::new(store, provider.clone(), SplitConfig::default()).unwrap();

    let initial = "Fix the login bug.\n\nReview dashboard mockups.";
    let outcome = engine.split(initial, 2).await.unwrap();
    assert_eq!(outcome.stats.total_chunks, 2);
    assert_eq!(provider.batch_calls(), 1);

    let updated = engine
        .add_and_resplit(&outcome.session_id, "Plan Q2 roadmap.", 3)
        .await
        .unwrap();

    assert_eq!(updated.stats.new_chunks, Some(1));
    assert_eq!(updated.stats.cached_embeddings, Some(2));
    assert_eq!(updated.stats.total_chunks, 3);
    assert_eq!(provider.batch_calls(), 2, "only the new chunk was embedded");

    // Re-adding identical text is a no-op for the chunk set and the cache.
    let repeated = engine
        .add_and_resplit(&outcome.session_id, "Plan Q2 roadmap.", 3)
        .await
        .unwrap();
    assert_eq!(repeated.stats.new_chunks, Some(0));
    assert_eq!(repeated.stats.cached_embeddings, Some(3));
    assert_eq!(provider.batch_calls(), 2, "nothing new to embed");
}

#[tokio::test]
async fn unknown_session_is_reported_as_not_found() {
    let engine = default_engine();

    let resplit = engine.add_and_resplit("session-missing", "text", 2).await;
    assert!(matches!(resplit, Err(EngineError::SessionNotFound(_))));

    let report = engine.bleeding_report("session-missing").await;
    assert!(matches!(report, Err(EngineError::SessionNotFound(_))));
}

#[tokio::test]
async fn bleeding_report_groups_residual_connections() {
    init_logging();
    let engine = SplitEngine::new(
        Arc::new(MemoryStore::new()),
        Arc::new(KeywordProvider),
        SplitConfig::default(),
    )
    .unwrap();

    let text = "Debug the login flow.\n\nRotate the password secrets.\n\nDraft the budget plan.";
    let outcome = engine.split(text, 2).await.unwrap();

    // login/password chunks stay together; the budget chunk is cut away
    // but remains connected to both through above-threshold edges.
    assert_eq!(outcome.workstreams.len(), 2);
    assert_eq!(outcome.workstreams[0].chunks.len(), 2);
    assert_eq!(outcome.workstreams[1].chunks.len(), 1);
    assert_eq!(outcome.workstreams[1].bleeding_edges.len(), 2);
    assert!(outcome.workstreams[1]
        .bleeding_edges
        .iter()
        .all(|b| b.connected_to == "ws-1"));

    let report = engine.bleeding_report(&outcome.session_id).await.unwrap();
    assert_eq!(report.connections.len(), 1);
    assert_eq!(
        report.connections[0].between,
        ("ws-1".to_string(), "ws-2".to_string())
    );
    assert_eq!(report.connections[0].edges.len(), 2);
    assert!((report.connections[0].weight - report.cut_weight).abs() < 1e-5);
    assert!((report.cut_weight - outcome.stats.cut_weight).abs() < 1e-5);
}

#[tokio::test]
async fn randomized_algorithm_is_reproducible_for_a_seed() {
    let config = SplitConfig {
        algorithm: CutAlgorithm::Randomized,
        seed: 1234,
        ..Default::default()
    };

    let run = |config: SplitConfig| async move {
        let engine = SplitEngine::new(
            Arc::new(MemoryStore::new()),
            Arc::new(KeywordProvider),
            config,
        )
        .unwrap();
        engine
            .split(
                "Debug the login flow.\n\nRotate the password secrets.\n\nDraft the budget plan.",
                2,
            )
            .await
            .unwrap()
    };

    let first = run(config.clone()).await;
    let second = run(config).await;

    let ids = |outcome: &mindsplit_engine::SplitOutcome| -> Vec<Vec<String>> {
        outcome
            .workstreams
            .iter()
            .map(|w| w.chunks.iter().map(|c| c.id.clone()).collect())
            .collect()
    };
    assert_eq!(ids(&first), ids(&second));

    let all: HashSet<String> = first
        .workstreams
        .iter()
        .flat_map(|w| w.chunks.iter().map(|c| c.id.clone()))
        .collect();
    assert_eq!(all.len(), 3, "randomized path still covers every chunk");
}

#[tokio::test]
async fn sessions_survive_a_file_store_reopen() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("mindsplit.json");

    let session_id = {
        let store = Arc::new(FileStore::open(&path).await?);
        let engine =
            SplitEngine::new(store, Arc::new(HashEmbedding::default()), SplitConfig::default())?;
        engine.split(SCENARIO, 2).await?.session_id
    };

    let store = Arc::new(FileStore::open(&path).await?);
    let provider = Arc::new(HashEmbedding::default());
    let engine = SplitEngine::new(store, provider.clone(), SplitConfig::default())?;

    let report = engine.bleeding_report(&session_id).await?;
    assert_eq!(report.session_id, session_id);

    let updated = engine
        .add_and_resplit(&session_id, "Write release notes.", 2)
        .await?;
    assert_eq!(updated.stats.new_chunks, Some(1));
    assert_eq!(updated.stats.cached_embeddings, Some(3));
    assert_eq!(provider.batch_calls(), 1, "old embeddings came from disk");
    Ok(())
}

#[tokio::test]
async fn empty_input_yields_no_workstreams() {
    let engine = default_engine();
    let outcome = engine.split("   \n\n  ", 3).await.unwrap();

    assert!(outcome.workstreams.is_empty());
    assert_eq!(outcome.stats.total_chunks, 0);
    assert_eq!(outcome.stats.cut_weight, 0.0);
}

#[tokio::test]
async fn invalid_config_is_rejected_at_construction() {
    let result = SplitEngine::new(
        Arc::new(MemoryStore::new()),
        Arc::new(HashEmbedding::default()),
        SplitConfig {
            similarity_threshold: -0.5,
            ..Default::default()
        },
    );
    assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
}
