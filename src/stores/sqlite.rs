//! SQLite-backed stores, sharing one [`Database`].
//!
//! rusqlite is synchronous, so every statement runs on tokio's blocking
//! pool and the calling task only awaits the result.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use super::{HistoryStore, PositionStore};
use crate::database::Database;
use crate::types::errors::{HistoryError, PositionError};
use crate::types::history::HistoryEntry;
use crate::types::position::LastPosition;

/// Runs `f` against the locked connection on the blocking pool.
async fn run_blocking<T, F>(db: &Arc<Database>, f: F) -> Result<T, String>
where
    F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let db = Arc::clone(db);
    tokio::task::spawn_blocking(move || {
        let conn = db.connection();
        f(&conn)
    })
    .await
    .map_err(|e| format!("blocking task failed: {}", e))?
    .map_err(|e| e.to_string())
}

/// Returns the current UNIX timestamp in seconds.
fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// History store over the `search_history` table.
pub struct SqliteHistoryStore {
    db: Arc<Database>,
}

impl SqliteHistoryStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn row_to_entry(row: &rusqlite::Row) -> rusqlite::Result<HistoryEntry> {
        Ok(HistoryEntry {
            name: row.get(0)?,
            count: row.get(1)?,
            last_used: row.get(2)?,
        })
    }
}

#[async_trait]
impl HistoryStore for SqliteHistoryStore {
    async fn list(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        run_blocking(&self.db, |conn| {
            let mut stmt = conn.prepare("SELECT name, count, last_used FROM search_history")?;
            let rows = stmt.query_map([], Self::row_to_entry)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
        })
        .await
        .map_err(HistoryError::StoreUnavailable)
    }

    async fn upsert_increment(&self, name: &str) -> Result<(), HistoryError> {
        let name = name.to_string();
        run_blocking(&self.db, move |conn| {
            conn.execute(
                "INSERT INTO search_history (name, count, last_used) \
                 VALUES (?1, 1, (SELECT COALESCE(MAX(last_used), 0) + 1 FROM search_history)) \
                 ON CONFLICT(name) DO UPDATE SET count = count + 1, last_used = excluded.last_used",
                params![name],
            )
        })
        .await
        .map_err(HistoryError::StoreUnavailable)?;
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), HistoryError> {
        let owned = name.to_string();
        let affected = run_blocking(&self.db, move |conn| {
            conn.execute("DELETE FROM search_history WHERE name = ?1", params![owned])
        })
        .await
        .map_err(HistoryError::StoreUnavailable)?;

        if affected == 0 {
            return Err(HistoryError::NotFound(name.to_string()));
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), HistoryError> {
        let removed = run_blocking(&self.db, |conn| conn.execute("DELETE FROM search_history", []))
            .await
            .map_err(HistoryError::StoreUnavailable)?;
        debug!(removed, "cleared search history");
        Ok(())
    }
}

/// Position store over the single-row `last_position` table.
pub struct SqlitePositionStore {
    db: Arc<Database>,
}

impl SqlitePositionStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PositionStore for SqlitePositionStore {
    async fn save(&self, position: LastPosition) -> Result<(), PositionError> {
        let updated_at = now();
        run_blocking(&self.db, move |conn| {
            conn.execute(
                "INSERT INTO last_position (id, latitude, longitude, updated_at) \
                 VALUES (1, ?1, ?2, ?3) \
                 ON CONFLICT(id) DO UPDATE SET latitude = excluded.latitude, \
                 longitude = excluded.longitude, updated_at = excluded.updated_at",
                params![position.latitude, position.longitude, updated_at],
            )
        })
        .await
        .map_err(PositionError::StoreUnavailable)?;
        Ok(())
    }

    async fn load(&self) -> Result<Option<LastPosition>, PositionError> {
        run_blocking(&self.db, |conn| {
            conn.query_row(
                "SELECT latitude, longitude FROM last_position WHERE id = 1",
                [],
                |row| Ok(LastPosition::new(row.get(0)?, row.get(1)?)),
            )
            .optional()
        })
        .await
        .map_err(PositionError::StoreUnavailable)
    }
}
