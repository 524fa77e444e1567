use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection};

use crate::error::StorageError;
use crate::traits::{BatchOp, BatchWriter, KvPairs, KvStore};

const CREATE_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS entries (key BLOB PRIMARY KEY, value BLOB NOT NULL)";
const UPSERT: &str = "INSERT OR REPLACE INTO entries (key, value) VALUES (?1, ?2)";
const REMOVE: &str = "DELETE FROM entries WHERE key = ?1";

/// SQLite-backed key-value store with a single `entries` table.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a database file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        Self::with_connection(conn)
    }

    /// Private in-memory database, mostly for tests.
    pub fn in_memory() -> Result<Self, StorageError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        conn.execute(CREATE_TABLE, [])?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|e| StorageError::ReadError {
            reason: e.to_string(),
        })
    }
}

impl KvStore for SqliteStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached("SELECT value FROM entries WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        let value = match rows.next()? {
            Some(row) => Some(row.get(0)?),
            None => None,
        };
        Ok(value)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StorageError> {
        let conn = self.lock()?;
        conn.execute(UPSERT, params![key, value])?;
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<(), StorageError> {
        let conn = self.lock()?;
        conn.execute(REMOVE, params![key])?;
        Ok(())
    }

    fn exists(&self, key: &[u8]) -> Result<bool, StorageError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached("SELECT 1 FROM entries WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        let found = rows.next()?.is_some();
        Ok(found)
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<KvPairs, StorageError> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare_cached("SELECT key, value FROM entries WHERE key >= ?1 ORDER BY key")?;
        let mut rows = stmt.query(params![prefix])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let key: Vec<u8> = row.get(0)?;
            // BLOBs sort bytewise, so the first non-matching key ends the range.
            if !key.starts_with(prefix) {
                break;
            }
            out.push((key, row.get(1)?));
        }
        Ok(out)
    }
}

impl BatchWriter for SqliteStore {
    fn write_batch(&self, ops: Vec<BatchOp>) -> Result<(), StorageError> {
        let mut conn = self.conn.lock().map_err(|e| StorageError::BatchError {
            reason: e.to_string(),
        })?;
        let tx = conn.transaction()?;
        for op in ops {
            match op {
                BatchOp::Put { key, value } => {
                    tx.execute(UPSERT, params![key, value])?;
                }
                BatchOp::Delete { key } => {
                    tx.execute(REMOVE, params![key])?;
                }
            }
        }
        tx.commit()?;
        Ok(())
    }
}
