//! Unit tests for the HistoryManager public API.
//!
//! Every behavioural case runs against both the SQLite store and the
//! in-memory store, through the `HistoryManagerTrait` interface.

use std::sync::Arc;

use async_trait::async_trait;
use rstest::rstest;

use mapsearch::database::Database;
use mapsearch::managers::history_manager::{HistoryManager, HistoryManagerTrait};
use mapsearch::stores::{HistoryStore, MemoryHistoryStore, SqliteHistoryStore};
use mapsearch::types::errors::HistoryError;
use mapsearch::types::history::HistoryEntry;

#[derive(Clone, Copy, Debug)]
enum Backend {
    Memory,
    Sqlite,
}

fn manager(backend: Backend) -> HistoryManager {
    let store: Arc<dyn HistoryStore> = match backend {
        Backend::Memory => Arc::new(MemoryHistoryStore::new()),
        Backend::Sqlite => Arc::new(SqliteHistoryStore::new(Arc::new(
            Database::open_in_memory().expect("Failed to open in-memory database"),
        ))),
    };
    HistoryManager::new(store)
}

fn pairs(entries: &[HistoryEntry]) -> Vec<(&str, i64)> {
    entries.iter().map(|e| (e.name.as_str(), e.count)).collect()
}

/// A store whose every operation fails, as if the database file vanished.
struct BrokenStore;

#[async_trait]
impl HistoryStore for BrokenStore {
    async fn list(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        Err(HistoryError::StoreUnavailable("disk I/O error".to_string()))
    }
    async fn upsert_increment(&self, _name: &str) -> Result<(), HistoryError> {
        Err(HistoryError::StoreUnavailable("disk I/O error".to_string()))
    }
    async fn delete(&self, _name: &str) -> Result<(), HistoryError> {
        Err(HistoryError::StoreUnavailable("disk I/O error".to_string()))
    }
    async fn clear(&self) -> Result<(), HistoryError> {
        Err(HistoryError::StoreUnavailable("disk I/O error".to_string()))
    }
}

#[rstest]
#[case::memory(Backend::Memory)]
#[case::sqlite(Backend::Sqlite)]
#[tokio::test]
async fn test_repeat_selection_orders_by_count(#[case] backend: Backend) {
    let mgr = manager(backend);

    mgr.record_selection("A").await.unwrap();
    mgr.record_selection("B").await.unwrap();
    mgr.record_selection("A").await.unwrap();

    let history = mgr.get_history().await.unwrap();
    assert_eq!(pairs(&history), vec![("A", 2), ("B", 1)]);
}

#[rstest]
#[case::memory(Backend::Memory)]
#[case::sqlite(Backend::Sqlite)]
#[tokio::test]
async fn test_equal_counts_most_recent_first(#[case] backend: Backend) {
    let mgr = manager(backend);

    mgr.record_selection("first").await.unwrap();
    mgr.record_selection("second").await.unwrap();
    mgr.record_selection("third").await.unwrap();

    let history = mgr.get_history().await.unwrap();
    assert_eq!(
        pairs(&history),
        vec![("third", 1), ("second", 1), ("first", 1)]
    );

    // Bumping "first" to 2 moves it ahead; then "third" reaches 2 later and wins the tie.
    mgr.record_selection("first").await.unwrap();
    mgr.record_selection("third").await.unwrap();
    let history = mgr.get_history().await.unwrap();
    assert_eq!(
        pairs(&history),
        vec![("third", 2), ("first", 2), ("second", 1)]
    );
}

#[rstest]
#[case::memory(Backend::Memory)]
#[case::sqlite(Backend::Sqlite)]
#[tokio::test]
async fn test_remove_entry(#[case] backend: Backend) {
    let mgr = manager(backend);
    mgr.record_selection("keep").await.unwrap();
    mgr.record_selection("drop").await.unwrap();
    mgr.record_selection("drop").await.unwrap();

    mgr.remove_entry("drop").await.unwrap();

    let history = mgr.get_history().await.unwrap();
    assert_eq!(pairs(&history), vec![("keep", 1)]);
}

#[rstest]
#[case::memory(Backend::Memory)]
#[case::sqlite(Backend::Sqlite)]
#[tokio::test]
async fn test_remove_absent_is_noop(#[case] backend: Backend) {
    let mgr = manager(backend);
    mgr.record_selection("keep").await.unwrap();
    let before = mgr.get_history().await.unwrap();

    assert!(mgr.remove_entry("never-recorded").await.is_ok());

    assert_eq!(mgr.get_history().await.unwrap(), before);
}

#[rstest]
#[case::memory(Backend::Memory)]
#[case::sqlite(Backend::Sqlite)]
#[tokio::test]
async fn test_empty_name_is_a_valid_key(#[case] backend: Backend) {
    let mgr = manager(backend);
    mgr.record_selection("").await.unwrap();
    mgr.record_selection("").await.unwrap();

    assert_eq!(pairs(&mgr.get_history().await.unwrap()), vec![("", 2)]);

    mgr.remove_entry("").await.unwrap();
    assert!(mgr.get_history().await.unwrap().is_empty());
}

#[rstest]
#[case::memory(Backend::Memory)]
#[case::sqlite(Backend::Sqlite)]
#[tokio::test]
async fn test_clear_history(#[case] backend: Backend) {
    let mgr = manager(backend);
    mgr.record_selection("a").await.unwrap();
    mgr.record_selection("b").await.unwrap();

    mgr.clear_history().await.unwrap();
    assert!(mgr.get_history().await.unwrap().is_empty());
}

#[rstest]
#[case::memory(Backend::Memory)]
#[case::sqlite(Backend::Sqlite)]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_increments_are_not_lost(#[case] backend: Backend) {
    let mgr = Arc::new(manager(backend));

    let mut handles = Vec::new();
    for i in 0..40 {
        let mgr = mgr.clone();
        let name = if i % 4 == 0 { "other" } else { "hot" };
        handles.push(tokio::spawn(async move {
            mgr.record_selection(name).await.unwrap();
        }));
    }
    for h in handles {
        h.await.unwrap();
    }

    let history = mgr.get_history().await.unwrap();
    assert_eq!(pairs(&history), vec![("hot", 30), ("other", 10)]);
}

#[tokio::test]
async fn test_store_failure_surfaces_as_store_unavailable() {
    let mgr = HistoryManager::new(Arc::new(BrokenStore));

    assert!(matches!(
        mgr.get_history().await,
        Err(HistoryError::StoreUnavailable(_))
    ));
    assert!(matches!(
        mgr.record_selection("a").await,
        Err(HistoryError::StoreUnavailable(_))
    ));
    assert!(matches!(
        mgr.remove_entry("a").await,
        Err(HistoryError::StoreUnavailable(_))
    ));
}
