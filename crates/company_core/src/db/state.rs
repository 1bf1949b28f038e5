//! Named key-value tables over one SQLite connection.
//!
//! # Responsibility
//! - Resolve typed table handles by name (`get_or_add_table`).
//! - Scope every read/write in a commit-or-rollback transaction.
//! - Keep value encoding (JSON) inside the store boundary.
//!
//! # Invariants
//! - A closure passed to `StateStore::transaction` commits only on `Ok`.
//! - Entries are keyed by `(table_name, entry_key)`; tables never share rows.
//! - `enumerate` makes no ordering promise to callers.

use super::{open_db, open_db_in_memory, DbError, DbResult};
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::path::Path;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Shared handle to a replica's private state.
///
/// Clones point at the same connection; the mutex serializes transactions.
#[derive(Clone)]
pub struct StateStore {
    conn: Arc<Mutex<Connection>>,
}

impl Debug for StateStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStore").finish_non_exhaustive()
    }
}

impl StateStore {
    /// Opens (or creates) a file-backed store with the state schema in place.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    /// Opens a throwaway in-memory store with the state schema in place.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps an already migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Returns the typed handle for `name`, registering the table on first use.
    pub fn get_or_add_table<V>(&self, name: &str) -> DbResult<Table<V>> {
        self.transaction(|tx| {
            tx.inner.execute(
                "INSERT OR IGNORE INTO state_tables (name) VALUES (?1);",
                [name],
            )?;
            Ok::<_, DbError>(())
        })?;

        Ok(Table {
            name: Arc::from(name),
            _value: PhantomData,
        })
    }

    /// Lists registered table names in lexical order.
    pub fn table_names(&self) -> DbResult<Vec<String>> {
        self.transaction(|tx| {
            let mut stmt = tx
                .inner
                .prepare("SELECT name FROM state_tables ORDER BY name ASC;")?;
            let mut rows = stmt.query([])?;
            let mut names = Vec::new();
            while let Some(row) = rows.next()? {
                names.push(row.get(0)?);
            }
            Ok::<_, DbError>(names)
        })
    }

    /// Runs `work` inside one transaction.
    ///
    /// Commits when `work` returns `Ok`; an `Err` drops the transaction,
    /// which rolls back every write made through it.
    pub fn transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&StoreTransaction<'_>) -> Result<T, E>,
        E: From<DbError>,
    {
        let mut conn = self.conn.lock().map_err(|_| DbError::Poisoned)?;
        let scope = StoreTransaction {
            inner: conn.transaction().map_err(DbError::from)?,
        };
        let value = work(&scope)?;
        scope.inner.commit().map_err(DbError::from)?;
        Ok(value)
    }
}

/// Open transaction scope handed to table operations.
pub struct StoreTransaction<'conn> {
    inner: Transaction<'conn>,
}

/// Typed handle to one named table.
///
/// Cheap to clone; holds no connection state of its own.
pub struct Table<V> {
    name: Arc<str>,
    _value: PhantomData<fn() -> V>,
}

impl<V> Clone for Table<V> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            _value: PhantomData,
        }
    }
}

impl<V> Debug for Table<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table").field("name", &self.name).finish()
    }
}

impl<V> Table<V> {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<V> Table<V>
where
    V: Serialize + DeserializeOwned,
{
    /// Reads one value by key.
    pub fn try_get(&self, tx: &StoreTransaction<'_>, key: Uuid) -> DbResult<Option<V>> {
        let raw = self.raw_value(tx, key)?;
        raw.map(|text| decode_value(&text)).transpose()
    }

    /// Inserts `value` or replaces whatever is stored under `key`.
    pub fn add_or_update(&self, tx: &StoreTransaction<'_>, key: Uuid, value: &V) -> DbResult<()> {
        let encoded = serde_json::to_string(value)?;
        tx.inner.execute(
            "INSERT INTO state_entries (table_name, entry_key, entry_value)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (table_name, entry_key) DO UPDATE SET
                entry_value = excluded.entry_value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![&*self.name, key.to_string(), encoded],
        )?;
        Ok(())
    }

    /// Replaces the value under `key` only when it still equals `comparison`.
    ///
    /// Returns `false` when the key is absent or holds a different value.
    pub fn try_update(
        &self,
        tx: &StoreTransaction<'_>,
        key: Uuid,
        value: &V,
        comparison: &V,
    ) -> DbResult<bool> {
        let encoded = serde_json::to_string(value)?;
        let expected = serde_json::to_string(comparison)?;
        let changed = tx.inner.execute(
            "UPDATE state_entries
             SET
                entry_value = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE table_name = ?1
               AND entry_key = ?2
               AND entry_value = ?4;",
            params![&*self.name, key.to_string(), encoded, expected],
        )?;
        Ok(changed > 0)
    }

    /// Deletes `key` and returns the removed value; absent keys are a no-op.
    pub fn try_remove(&self, tx: &StoreTransaction<'_>, key: Uuid) -> DbResult<Option<V>> {
        let previous = self.try_get(tx, key)?;
        if previous.is_some() {
            tx.inner.execute(
                "DELETE FROM state_entries WHERE table_name = ?1 AND entry_key = ?2;",
                params![&*self.name, key.to_string()],
            )?;
        }
        Ok(previous)
    }

    /// Loads every entry of the table. Order is unspecified.
    pub fn enumerate(&self, tx: &StoreTransaction<'_>) -> DbResult<Vec<(Uuid, V)>> {
        let mut stmt = tx.inner.prepare(
            "SELECT entry_key, entry_value
             FROM state_entries
             WHERE table_name = ?1;",
        )?;
        let mut rows = stmt.query([&*self.name])?;
        let mut entries = Vec::new();

        while let Some(row) = rows.next()? {
            let key_text: String = row.get(0)?;
            let key = Uuid::parse_str(&key_text).map_err(|_| DbError::InvalidKey(key_text))?;
            let value_text: String = row.get(1)?;
            entries.push((key, decode_value(&value_text)?));
        }

        Ok(entries)
    }

    /// Number of entries currently stored in the table.
    pub fn count(&self, tx: &StoreTransaction<'_>) -> DbResult<u64> {
        let count: i64 = tx.inner.query_row(
            "SELECT COUNT(*) FROM state_entries WHERE table_name = ?1;",
            [&*self.name],
            |row| row.get(0),
        )?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    fn raw_value(&self, tx: &StoreTransaction<'_>, key: Uuid) -> DbResult<Option<String>> {
        let raw = tx
            .inner
            .query_row(
                "SELECT entry_value
                 FROM state_entries
                 WHERE table_name = ?1 AND entry_key = ?2;",
                params![&*self.name, key.to_string()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(raw)
    }
}

fn decode_value<V: DeserializeOwned>(text: &str) -> DbResult<V> {
    Ok(serde_json::from_str(text)?)
}
