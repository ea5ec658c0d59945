//! `kv_store` schema versioning.
//!
//! # Invariants
//! - The on-disk version is `PRAGMA user_version`; step `n` upgrades
//!   version `n` to `n + 1`.
//! - A database newer than `schema_version()` is refused, never written.

use super::{StorageError, StorageResult};
use log::info;
use rusqlite::Connection;

const STEPS: &[&str] = &[include_str!("schema/0001_kv_store.sql")];

/// Schema version this build reads and writes.
pub fn schema_version() -> u32 {
    STEPS.len() as u32
}

/// Version recorded in the database file.
pub fn stored_version(conn: &Connection) -> StorageResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Applies every missing step in one transaction.
///
/// Returns the version found before upgrading.
pub fn upgrade(conn: &mut Connection) -> StorageResult<u32> {
    let found = stored_version(conn)?;
    let supported = schema_version();
    if found > supported {
        return Err(StorageError::UnsupportedSchemaVersion { found, supported });
    }
    if found == supported {
        return Ok(found);
    }

    let tx = conn.transaction()?;
    for step in &STEPS[found as usize..] {
        tx.execute_batch(step)?;
    }
    tx.pragma_update(None, "user_version", supported)?;
    tx.commit()?;

    info!(
        "event=kv_schema_upgrade module=storage status=ok from_version={found} to_version={supported}"
    );
    Ok(found)
}
