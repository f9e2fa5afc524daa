//! Storage integration tests using real SQLite databases.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio::sync::Mutex;

use mcpscout_core::{
    query_signature, Aggregator, CacheStore, McpFilter, McpRepository, McpSortKey, SearchOptions,
    SourceAdapter,
};
use mcpscout_storage::{seed_sample_mcps, Database, SqliteCacheStore, SqliteMcpRepository};
use tests::fixtures::search_result;
use tests::CountingAdapter;

fn test_db() -> Arc<Mutex<Database>> {
    Arc::new(Mutex::new(Database::open_in_memory().unwrap()))
}

#[tokio::test]
async fn test_seeded_library_lists_and_filters() {
    let db = test_db();
    let repo = SqliteMcpRepository::new(db);

    seed_sample_mcps(&repo).await.unwrap();

    let all = repo.list(&McpFilter::with_limit(50)).await.unwrap();
    assert_eq!(all.len(), 3);
    // Default ordering is popularity descending.
    assert_eq!(all[0].name, "weather.forecast");

    let filter = McpFilter {
        domain: Some("development".to_string()),
        ..McpFilter::with_limit(50)
    };
    let development = repo.list(&filter).await.unwrap();
    assert_eq!(development.len(), 1);
    assert_eq!(development[0].name, "filesystem.operations");

    let filter = McpFilter {
        sort_by: McpSortKey::Name,
        ..McpFilter::with_limit(50)
    };
    let by_name = repo.list(&filter).await.unwrap();
    assert_eq!(by_name[0].name, "filesystem.operations");
}

#[tokio::test]
async fn test_tag_filter_matches_substring_of_tag_set() {
    let db = test_db();
    let repo = SqliteMcpRepository::new(db);
    seed_sample_mcps(&repo).await.unwrap();

    let filter = McpFilter {
        tag: Some("forecast".to_string()),
        ..McpFilter::with_limit(50)
    };
    let tagged = repo.list(&filter).await.unwrap();

    assert_eq!(tagged.len(), 1);
    assert_eq!(tagged[0].name, "weather.forecast");
}

#[tokio::test]
async fn test_sqlite_cache_round_trip_through_aggregator() {
    let db = test_db();
    let adapter = CountingAdapter::new("a", vec![search_result("x", "http://a", 0.8)]);
    let calls = adapter.call_counter();

    let agg = Aggregator::new(
        vec![adapter as Arc<dyn SourceAdapter>],
        Arc::new(SqliteCacheStore::new(db)),
    );

    let first = agg.search("x", 10, &SearchOptions::default()).await.unwrap();
    let second = agg.search("x", 10, &SearchOptions::default()).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_expired_sqlite_cache_entry_forces_fresh_search() {
    let db = test_db();
    let adapter = CountingAdapter::new("a", vec![search_result("x", "http://a", 0.8)]);
    let calls = adapter.call_counter();

    let agg = Aggregator::new(
        vec![adapter as Arc<dyn SourceAdapter>],
        Arc::new(SqliteCacheStore::new(db.clone())),
    );

    agg.search("x", 10, &SearchOptions::default()).await.unwrap();

    // Age the cached entry past its TTL.
    {
        let guard = db.lock().await;
        guard
            .connection()
            .execute(
                "UPDATE search_cache SET expires_at = datetime('now', '-1 seconds')",
                [],
            )
            .unwrap();
    }

    agg.search("x", 10, &SearchOptions::default()).await.unwrap();
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_cache_store_distinguishes_signatures() {
    let db = test_db();
    let store = SqliteCacheStore::new(db);

    let key_a = query_signature("weather", 20, &["github".to_string()], 0.0);
    let key_b = query_signature("weather", 10, &["github".to_string()], 0.0);
    assert_ne!(key_a, key_b);

    store
        .put(&key_a, &[search_result("x", "http://a", 0.8)], Duration::from_secs(60))
        .await
        .unwrap();

    assert!(store.get(&key_a).await.unwrap().is_some());
    assert!(store.get(&key_b).await.unwrap().is_none());
}

#[tokio::test]
async fn test_library_survives_database_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mcpscout.db");

    {
        let db = Arc::new(Mutex::new(Database::open(&path).unwrap()));
        let repo = SqliteMcpRepository::new(db);
        seed_sample_mcps(&repo).await.unwrap();
    }

    let db = Arc::new(Mutex::new(Database::open(&path).unwrap()));
    let repo = SqliteMcpRepository::new(db);
    let all = repo.list(&McpFilter::with_limit(50)).await.unwrap();

    assert_eq!(all.len(), 3);
}
