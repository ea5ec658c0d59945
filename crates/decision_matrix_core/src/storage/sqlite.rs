//! SQLite-backed storage.
//!
//! # Responsibility
//! - Persist key/value slots in the `kv_store` table.
//!
//! # Invariants
//! - A `SqliteStorage` only exists over a connection whose schema is current.
//! - `set` is an upsert; the previous value is replaced whole.

use super::schema::upgrade;
use super::{Storage, StorageError, StorageResult};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Key/value storage over one SQLite connection.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens (or creates) a database file and upgrades its schema.
    ///
    /// # Side effects
    /// - Emits `db_open` with mode, starting schema version and duration.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Self::connect("file", || Connection::open(path))
    }

    pub fn open_in_memory() -> StorageResult<Self> {
        Self::connect("memory", Connection::open_in_memory)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn connect(
        mode: &str,
        open: impl FnOnce() -> rusqlite::Result<Connection>,
    ) -> StorageResult<Self> {
        let started_at = Instant::now();
        let opened = open().map_err(StorageError::from).and_then(|mut conn| {
            conn.busy_timeout(BUSY_TIMEOUT)?;
            let found = upgrade(&mut conn)?;
            Ok((conn, found))
        });

        match opened {
            Ok((conn, found)) => {
                info!(
                    "event=db_open module=storage status=ok mode={} schema_from={} duration_ms={}",
                    mode,
                    found,
                    started_at.elapsed().as_millis()
                );
                Ok(Self { conn })
            }
            Err(err) => {
                error!(
                    "event=db_open module=storage status=error mode={} duration_ms={} error={}",
                    mode,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}

impl Storage for SqliteStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1;", [key])?;
        Ok(())
    }
}
