//! Storage backends behind one persistence contract.
//!
//! # Responsibility
//! - Define `StorageBackend`, the raw persistence primitives every backend
//!   honors.
//! - Provide the local key-value backend and the document backend.
//! - Build the configured backend once so call sites never branch on kind.
//!
//! # Invariants
//! - `delete` is idempotent on every backend.
//! - Write failures are always returned to the caller, never only logged.
//! - Document-backend listings are sorted by `name`; local listings keep
//!   storage order.

use crate::db::migrations::{current_version, latest_version};
use crate::db::DbError;
use crate::model::entity::{Entity, EntityId};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod document;
pub mod kv;
pub mod local;

pub use document::DocumentBackend;
pub use kv::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};
pub use local::LocalBackend;

pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised by storage backends and key-value stores.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    /// Update target does not exist (document backend only).
    NotFound {
        collection: &'static str,
        id: EntityId,
    },
    /// Stored data cannot be decoded into records.
    InvalidData(String),
    Serialization(serde_json::Error),
    /// A key-value write would exceed the store's capacity.
    QuotaExceeded {
        key: String,
        required_bytes: usize,
        quota_bytes: usize,
    },
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { collection, id } => {
                write!(f, "document not found: {collection}/{id}")
            }
            Self::InvalidData(message) => write!(f, "invalid stored data: {message}"),
            Self::Serialization(err) => write!(f, "serialization failed: {err}"),
            Self::QuotaExceeded {
                key,
                required_bytes,
                quota_bytes,
            } => write!(
                f,
                "storage quota exceeded writing `{key}`: {required_bytes} bytes needed, {quota_bytes} available"
            ),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Which persistence mechanism a backend uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// One serialized collection blob per kind in a key-value store.
    Local,
    /// One document per record in a document collection.
    Remote,
}

impl BackendKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote => "remote",
        }
    }

    /// Parses a configuration value (`local` or `remote`, case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" => Some(Self::Local),
            "remote" => Some(Self::Remote),
            _ => None,
        }
    }
}

impl Display for BackendKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw persistence primitives for one entity collection.
pub trait StorageBackend<E: Entity> {
    fn kind(&self) -> BackendKind;

    /// Returns every stored record.
    fn list(&self) -> StorageResult<Vec<E>>;

    /// Stores `entity` under its id, overwriting any existing record.
    fn create(&self, entity: &E) -> StorageResult<()>;

    /// Replaces every field of the record keyed by `entity`'s id.
    fn update(&self, entity: &E) -> StorageResult<()>;

    /// Removes the record if present.
    fn delete(&self, id: &str) -> StorageResult<()>;
}

impl<E: Entity, B: StorageBackend<E> + ?Sized> StorageBackend<E> for Box<B> {
    fn kind(&self) -> BackendKind {
        (**self).kind()
    }

    fn list(&self) -> StorageResult<Vec<E>> {
        (**self).list()
    }

    fn create(&self, entity: &E) -> StorageResult<()> {
        (**self).create(entity)
    }

    fn update(&self, entity: &E) -> StorageResult<()> {
        (**self).update(entity)
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        (**self).delete(id)
    }
}

/// Builds the configured backend for `E` over a migrated connection.
pub fn open_backend<'conn, E: Entity + 'static>(
    kind: BackendKind,
    conn: &'conn Connection,
) -> StorageResult<Box<dyn StorageBackend<E> + 'conn>> {
    match kind {
        BackendKind::Local => {
            let store = SqliteKeyValueStore::try_new(conn)?;
            Ok(Box::new(LocalBackend::<E, _>::new(store)))
        }
        BackendKind::Remote => Ok(Box::new(DocumentBackend::<E>::try_new(conn)?)),
    }
}

pub(crate) fn ensure_connection_ready(conn: &Connection, table: &'static str) -> StorageResult<()> {
    let expected_version = latest_version();
    let actual_version = current_version(conn)?;
    if actual_version != expected_version {
        return Err(StorageError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let exists: bool = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    if !exists {
        return Err(StorageError::MissingRequiredTable(table));
    }

    Ok(())
}
