//! History Manager.
//!
//! Implements `HistoryManagerTrait` — recording selected search results,
//! listing them in frequency/recency order, and removing them, on top of
//! any [`HistoryStore`].

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::stores::HistoryStore;
use crate::types::errors::HistoryError;
use crate::types::history::HistoryEntry;

/// Trait defining search history operations.
#[async_trait]
pub trait HistoryManagerTrait {
    async fn get_history(&self) -> Result<Vec<HistoryEntry>, HistoryError>;
    async fn record_selection(&self, name: &str) -> Result<(), HistoryError>;
    async fn remove_entry(&self, name: &str) -> Result<(), HistoryError>;
    async fn clear_history(&self) -> Result<(), HistoryError>;
}

/// History manager over a shared history store.
///
/// Mutations queue on a fair async mutex, so writes reach the store in the
/// order they were issued and concurrent increments of one name never race.
pub struct HistoryManager {
    store: Arc<dyn HistoryStore>,
    write_lock: Mutex<()>,
}

impl HistoryManager {
    /// Creates a new `HistoryManager` using the provided store.
    pub fn new(store: Arc<dyn HistoryStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl HistoryManagerTrait for HistoryManager {
    /// Lists every entry, highest count first, ties broken by recency.
    async fn get_history(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let mut entries = self.store.list().await?;
        entries.sort_by(HistoryEntry::display_order);
        Ok(entries)
    }

    /// Records that `name` was picked from the search results. Creates the
    /// entry with count 1 or increments the existing one.
    async fn record_selection(&self, name: &str) -> Result<(), HistoryError> {
        let _guard = self.write_lock.lock().await;
        self.store.upsert_increment(name).await?;
        debug!(name, "recorded history selection");
        Ok(())
    }

    /// Removes the entry for `name`. Removing an absent name is a no-op.
    async fn remove_entry(&self, name: &str) -> Result<(), HistoryError> {
        let _guard = self.write_lock.lock().await;
        match self.store.delete(name).await {
            Ok(()) => {
                debug!(name, "removed history entry");
                Ok(())
            }
            Err(HistoryError::NotFound(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Clears all history entries.
    async fn clear_history(&self) -> Result<(), HistoryError> {
        let _guard = self.write_lock.lock().await;
        self.store.clear().await
    }
}
