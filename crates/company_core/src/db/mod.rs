//! SQLite-backed transactional state store.
//!
//! # Responsibility
//! - Open and configure SQLite connections for replica state.
//! - Create the state schema on first open.
//! - Expose named, typed key-value tables with transaction scopes.
//!
//! # Invariants
//! - Schema revision is tracked via `PRAGMA user_version`.
//! - Core code must not read/write table data before the schema exists.
//! - Every table read or write happens inside a `StoreTransaction`.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;
mod state;

pub use open::{open_db, open_db_in_memory};
pub use state::{StateStore, StoreTransaction, Table};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    Serialization(serde_json::Error),
    InvalidKey(String),
    Poisoned,
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Serialization(err) => write!(f, "state value serialization failed: {err}"),
            Self::InvalidKey(key) => write!(f, "invalid state entry key `{key}`"),
            Self::Poisoned => write!(f, "state store connection lock is poisoned"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::InvalidKey(_) | Self::Poisoned => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for DbError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}
