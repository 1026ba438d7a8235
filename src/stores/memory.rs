//! In-memory stores. Nothing survives the process; useful for tests and for
//! running the coordinators without a database file.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{HistoryStore, PositionStore};
use crate::types::errors::{HistoryError, PositionError};
use crate::types::history::HistoryEntry;
use crate::types::position::LastPosition;

#[derive(Default)]
struct HistoryTable {
    entries: HashMap<String, HistoryEntry>,
    seq: i64,
}

/// History store kept in a `HashMap`.
#[derive(Default)]
pub struct MemoryHistoryStore {
    table: Mutex<HistoryTable>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HistoryTable>, HistoryError> {
        self.table
            .lock()
            .map_err(|e| HistoryError::StoreUnavailable(e.to_string()))
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn list(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        Ok(self.lock()?.entries.values().cloned().collect())
    }

    async fn upsert_increment(&self, name: &str) -> Result<(), HistoryError> {
        let mut table = self.lock()?;
        table.seq += 1;
        let seq = table.seq;
        table
            .entries
            .entry(name.to_string())
            .and_modify(|e| {
                e.count += 1;
                e.last_used = seq;
            })
            .or_insert_with(|| HistoryEntry::new(name, 1, seq));
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), HistoryError> {
        match self.lock()?.entries.remove(name) {
            Some(_) => Ok(()),
            None => Err(HistoryError::NotFound(name.to_string())),
        }
    }

    async fn clear(&self) -> Result<(), HistoryError> {
        self.lock()?.entries.clear();
        Ok(())
    }
}

/// Position store holding at most one value.
#[derive(Default)]
pub struct MemoryPositionStore {
    slot: Mutex<Option<LastPosition>>,
}

impl MemoryPositionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PositionStore for MemoryPositionStore {
    async fn save(&self, position: LastPosition) -> Result<(), PositionError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| PositionError::StoreUnavailable(e.to_string()))?;
        *slot = Some(position);
        Ok(())
    }

    async fn load(&self) -> Result<Option<LastPosition>, PositionError> {
        let slot = self
            .slot
            .lock()
            .map_err(|e| PositionError::StoreUnavailable(e.to_string()))?;
        Ok(*slot)
    }
}
