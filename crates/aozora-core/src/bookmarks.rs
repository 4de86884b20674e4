//! Bookmark and watch-list storage.
//!
//! Saved entries live as JSON blobs in a namespaced key-value table,
//! keyed by MAL id. The `KvStore` trait is the seam a different
//! persistent store plugs into.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use crate::error::AozoraError;

/// Namespace for the bookmark set.
pub const NS_BOOKMARKS: &str = "bookmarks";
/// Namespace for the watch-list set.
pub const NS_WATCHLIST: &str = "watchlist";

/// Minimal key-value contract the shelves run on.
///
/// Keys are scoped by namespace; values are opaque strings.
pub trait KvStore {
    fn get(&self, namespace: &str, key: &str) -> Result<Option<String>, AozoraError>;
    fn set(&self, namespace: &str, key: &str, value: &str) -> Result<(), AozoraError>;
    fn delete(&self, namespace: &str, key: &str) -> Result<(), AozoraError>;
    /// All values in a namespace, in key order.
    fn values(&self, namespace: &str) -> Result<Vec<String>, AozoraError>;
}

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS kv (
    namespace TEXT NOT NULL,
    key TEXT NOT NULL,
    value TEXT NOT NULL,
    PRIMARY KEY (namespace, key)
);";

/// SQLite-backed key-value store.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> Result<Self, AozoraError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, AozoraError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }
}

impl KvStore for SqliteStore {
    fn get(&self, namespace: &str, key: &str) -> Result<Option<String>, AozoraError> {
        self.conn
            .query_row(
                "SELECT value FROM kv WHERE namespace = ?1 AND key = ?2",
                params![namespace, key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    fn set(&self, namespace: &str, key: &str, value: &str) -> Result<(), AozoraError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (namespace, key, value) VALUES (?1, ?2, ?3)",
            params![namespace, key, value],
        )?;
        Ok(())
    }

    fn delete(&self, namespace: &str, key: &str) -> Result<(), AozoraError> {
        self.conn.execute(
            "DELETE FROM kv WHERE namespace = ?1 AND key = ?2",
            params![namespace, key],
        )?;
        Ok(())
    }

    fn values(&self, namespace: &str) -> Result<Vec<String>, AozoraError> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM kv WHERE namespace = ?1 ORDER BY key")?;
        let rows = stmt
            .query_map(params![namespace], |row| row.get(0))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(rows)
    }
}

/// A saved catalog entry, stored as a JSON blob keyed by MAL id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedEntry {
    pub mal_id: u64,
    pub title: String,
    pub image_url: Option<String>,
    pub path: String,
}

/// Bookmark and watch-list shelves over any `KvStore`.
pub struct Shelf<S: KvStore> {
    store: S,
}

impl<S: KvStore> Shelf<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn add(&self, namespace: &str, entry: &SavedEntry) -> Result<(), AozoraError> {
        let value =
            serde_json::to_string(entry).map_err(|e| AozoraError::Parse(e.to_string()))?;
        self.store.set(namespace, &entry.mal_id.to_string(), &value)
    }

    pub fn remove(&self, namespace: &str, mal_id: u64) -> Result<(), AozoraError> {
        self.store.delete(namespace, &mal_id.to_string())
    }

    pub fn contains(&self, namespace: &str, mal_id: u64) -> Result<bool, AozoraError> {
        Ok(self.store.get(namespace, &mal_id.to_string())?.is_some())
    }

    pub fn get(&self, namespace: &str, mal_id: u64) -> Result<Option<SavedEntry>, AozoraError> {
        self.store
            .get(namespace, &mal_id.to_string())?
            .map(|value| {
                serde_json::from_str(&value).map_err(|e| AozoraError::Parse(e.to_string()))
            })
            .transpose()
    }

    /// Flip membership; returns whether the entry is saved afterwards.
    pub fn toggle(&self, namespace: &str, entry: &SavedEntry) -> Result<bool, AozoraError> {
        if self.contains(namespace, entry.mal_id)? {
            self.remove(namespace, entry.mal_id)?;
            Ok(false)
        } else {
            self.add(namespace, entry)?;
            Ok(true)
        }
    }

    /// All saved entries in a namespace, sorted by title for display.
    /// Blobs that no longer parse are skipped.
    pub fn list(&self, namespace: &str) -> Result<Vec<SavedEntry>, AozoraError> {
        let mut entries: Vec<SavedEntry> = self
            .store
            .values(namespace)?
            .iter()
            .filter_map(|value| serde_json::from_str(value).ok())
            .collect();
        entries.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saved(mal_id: u64, title: &str) -> SavedEntry {
        SavedEntry {
            mal_id,
            title: title.to_string(),
            image_url: None,
            path: format!("/p/{mal_id}"),
        }
    }

    #[test]
    fn test_store_crud() {
        let store = SqliteStore::open_memory().unwrap();
        assert_eq!(store.get(NS_BOOKMARKS, "1").unwrap(), None);

        store.set(NS_BOOKMARKS, "1", "a").unwrap();
        store.set(NS_BOOKMARKS, "1", "b").unwrap();
        assert_eq!(store.get(NS_BOOKMARKS, "1").unwrap().as_deref(), Some("b"));

        store.delete(NS_BOOKMARKS, "1").unwrap();
        assert_eq!(store.get(NS_BOOKMARKS, "1").unwrap(), None);
    }

    #[test]
    fn test_namespaces_are_independent() {
        let shelf = Shelf::new(SqliteStore::open_memory().unwrap());
        shelf.add(NS_BOOKMARKS, &saved(1, "A")).unwrap();

        assert!(shelf.contains(NS_BOOKMARKS, 1).unwrap());
        assert!(!shelf.contains(NS_WATCHLIST, 1).unwrap());

        shelf.add(NS_WATCHLIST, &saved(1, "A")).unwrap();
        shelf.remove(NS_BOOKMARKS, 1).unwrap();
        assert!(shelf.contains(NS_WATCHLIST, 1).unwrap());
    }

    #[test]
    fn test_shelf_roundtrip_and_order() {
        let shelf = Shelf::new(SqliteStore::open_memory().unwrap());
        shelf.add(NS_BOOKMARKS, &saved(2, "Vinland Saga")).unwrap();
        shelf.add(NS_BOOKMARKS, &saved(3, "Frieren")).unwrap();

        let listed = shelf.list(NS_BOOKMARKS).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].title, "Frieren");
        assert_eq!(shelf.get(NS_BOOKMARKS, 2).unwrap().unwrap(), saved(2, "Vinland Saga"));
    }

    #[test]
    fn test_toggle() {
        let shelf = Shelf::new(SqliteStore::open_memory().unwrap());
        let entry = saved(1, "A");
        assert!(shelf.toggle(NS_WATCHLIST, &entry).unwrap());
        assert!(!shelf.toggle(NS_WATCHLIST, &entry).unwrap());
        assert!(!shelf.contains(NS_WATCHLIST, 1).unwrap());
    }

    #[test]
    fn test_file_backed_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aozora.db");
        {
            let shelf = Shelf::new(SqliteStore::open(&path).unwrap());
            shelf.add(NS_BOOKMARKS, &saved(1, "A")).unwrap();
        }
        let shelf = Shelf::new(SqliteStore::open(&path).unwrap());
        assert!(shelf.contains(NS_BOOKMARKS, 1).unwrap());
    }
}
