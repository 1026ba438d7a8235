//! Durable collaborators behind the coordinators.
//!
//! The History Store and the Last-Position Store are consumed only through
//! the traits below, so the SQLite implementations can be swapped for the
//! in-memory ones (tests, embedding without a database file).

use async_trait::async_trait;

use crate::types::errors::{HistoryError, PositionError};
use crate::types::history::HistoryEntry;
use crate::types::position::LastPosition;

pub mod memory;
pub mod sqlite;

pub use memory::{MemoryHistoryStore, MemoryPositionStore};
pub use sqlite::{SqliteHistoryStore, SqlitePositionStore};

/// Keyed `(name, count)` records with a recency sequence.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Returns every entry, in no particular order.
    async fn list(&self) -> Result<Vec<HistoryEntry>, HistoryError>;

    /// Creates `name` with count 1, or increments its count. Either way the
    /// entry becomes the most recently used one.
    async fn upsert_increment(&self, name: &str) -> Result<(), HistoryError>;

    /// Deletes `name`. Returns `HistoryError::NotFound` when it is absent.
    async fn delete(&self, name: &str) -> Result<(), HistoryError>;

    /// Deletes every entry.
    async fn clear(&self) -> Result<(), HistoryError>;
}

/// Single-slot storage for the last map camera position.
#[async_trait]
pub trait PositionStore: Send + Sync {
    /// Overwrites the stored position.
    async fn save(&self, position: LastPosition) -> Result<(), PositionError>;

    /// Returns the stored position, or `None` if nothing was ever saved.
    async fn load(&self) -> Result<Option<LastPosition>, PositionError>;
}
