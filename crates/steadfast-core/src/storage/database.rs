//! SQLite-backed key-value storage.
//!
//! Every persisted app key (flags, streak record, chat transcript, shield
//! preferences) lives in one `kv` table as a JSON-encoded string.

use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection};

use super::{data_dir, migrations, KeyValueStore};
use crate::error::{Result, StorageError};

/// SQLite database for app state.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/steadfast.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("steadfast.db");
        Self::open_at(&path)
    }

    /// Open (or create) a database file at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        migrations::migrate(&self.conn)?;
        Ok(())
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM kv", [])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.get("test").unwrap().is_none());
        db.set("test", "hello").unwrap();
        assert_eq!(db.get("test").unwrap().unwrap(), "hello");
    }

    #[test]
    fn set_overwrites_existing_value() {
        let db = Database::open_memory().unwrap();
        db.set("isAuthenticated", "false").unwrap();
        db.set("isAuthenticated", "true").unwrap();
        assert_eq!(db.get("isAuthenticated").unwrap().as_deref(), Some("true"));
        assert_eq!(db.len().unwrap(), 1);
    }

    #[test]
    fn remove_and_clear() {
        let db = Database::open_memory().unwrap();
        db.set("a", "1").unwrap();
        db.set("b", "2").unwrap();
        db.remove("a").unwrap();
        assert!(db.get("a").unwrap().is_none());
        assert_eq!(db.get("b").unwrap().as_deref(), Some("2"));

        db.clear().unwrap();
        assert!(db.is_empty().unwrap());
    }

    #[test]
    fn file_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("steadfast.db");
        {
            let db = Database::open_at(&path).unwrap();
            db.set("hasSeenOnboarding", "true").unwrap();
        }
        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.get("hasSeenOnboarding").unwrap().as_deref(), Some("true"));
    }
}
