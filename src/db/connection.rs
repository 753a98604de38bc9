use rusqlite::Connection;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::errors::ArsenalError;

/// Bounded wait for a conflicting writer before a statement fails busy.
const BUSY_TIMEOUT_MS: u32 = 2000;

#[derive(Debug)]
pub struct Database {
    pub(crate) conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (creating if absent) the store at `path`. Parent directories
    /// are created on first use; a pre-existing incompatible schema is a
    /// fatal error.
    pub fn open(path: &Path) -> Result<Self, ArsenalError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)
            .map_err(|e| ArsenalError::Storage(format!("Failed to open database: {}", e)))?;

        // WAL lets readers proceed concurrently with a writer; the busy
        // timeout bounds lock waits from other processes
        conn.execute_batch(&format!(
            "PRAGMA journal_mode=WAL; PRAGMA busy_timeout={};",
            BUSY_TIMEOUT_MS
        ))
        .map_err(|e| ArsenalError::Storage(format!("Failed to set pragmas: {}", e)))?;

        let db = Self { conn: Arc::new(Mutex::new(conn)) };
        db.initialize()?;
        Ok(db)
    }

    /// Open the per-user default store (`~/.arsenal/payloads.db`).
    pub fn open_default() -> Result<Self, ArsenalError> {
        Self::open(&Self::default_path()?)
    }

    pub fn default_path() -> Result<PathBuf, ArsenalError> {
        let home = std::env::var("HOME")
            .map_err(|_| ArsenalError::Config("HOME is not set; pass an explicit store path".into()))?;
        Ok(PathBuf::from(home).join(".arsenal").join("payloads.db"))
    }

    pub fn in_memory() -> Result<Self, ArsenalError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| ArsenalError::Storage(format!("Failed to open in-memory db: {}", e)))?;
        let db = Self { conn: Arc::new(Mutex::new(conn)) };
        db.initialize()?;
        Ok(db)
    }

    fn initialize(&self) -> Result<(), ArsenalError> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(super::schema::CREATE_TABLES)
            .map_err(|e| ArsenalError::Storage(format!("Failed to create tables: {}", e)))?;
        verify_schema(&conn)?;
        conn.execute_batch(super::schema::CREATE_INDEXES)
            .map_err(|e| ArsenalError::Storage(format!("Failed to create indexes: {}", e)))?;
        Ok(())
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self { conn: self.conn.clone() }
    }
}

/// Check that both tables carry every required column. CREATE TABLE IF NOT
/// EXISTS leaves a pre-existing table untouched, so an older or foreign
/// schema surfaces here instead of as a confusing statement error later.
fn verify_schema(conn: &Connection) -> Result<(), ArsenalError> {
    for (table, required) in super::schema::REQUIRED_COLUMNS {
        let mut stmt = conn
            .prepare(&format!("SELECT name FROM pragma_table_info('{}')", table))
            .map_err(|e| ArsenalError::Storage(format!("Schema inspection failed: {}", e)))?;
        let columns: HashSet<String> = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| ArsenalError::Storage(format!("Schema inspection failed: {}", e)))?
            .filter_map(|r| r.ok())
            .collect();

        for column in *required {
            if !columns.contains(*column) {
                return Err(ArsenalError::Schema(format!(
                    "table '{}' is missing column '{}'; refusing to migrate an incompatible store",
                    table, column
                )));
            }
        }
    }
    Ok(())
}

/// Map a rusqlite failure into the taxonomy, keeping lock contention
/// distinguishable so callers can retry it.
pub(crate) fn db_err(context: &str, e: rusqlite::Error) -> ArsenalError {
    match &e {
        rusqlite::Error::SqliteFailure(err, _)
            if matches!(
                err.code,
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
            ) =>
        {
            ArsenalError::Busy(format!("{}: {}", context, e))
        }
        _ => ArsenalError::Storage(format!("{}: {}", context, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_parent_dirs() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("store").join("payloads.db");
        let _db = Database::open(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_reopen_preserves_schema() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("payloads.db");
        drop(Database::open(&path).unwrap());
        // Second open must leave the existing schema untouched
        let _db = Database::open(&path).unwrap();
    }

    #[test]
    fn test_incompatible_schema_is_fatal() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("payloads.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch("CREATE TABLE payloads (id INTEGER PRIMARY KEY, blob TEXT);")
                .unwrap();
        }
        let err = Database::open(&path).unwrap_err();
        assert!(matches!(err, ArsenalError::Schema(_)));
    }
}
