//! Records and the stores that persist them.
//!
//! A collection is an ordered list of `Record`s backed by one durable
//! container. Every store operation loads the full collection, applies the
//! change and rewrites the whole collection, holding the collection lock for
//! the entire cycle.
//!
//! ## Example
//!
//! ```ignore
//! use venue_content::model::{FileRecordStore, Filter, Record, RecordStore};
//!
//! let store = FileRecordStore::open("data", "events")?;
//! let created = store.create(Record::new().with("title", "Summer Festival"))?;
//! let found = store.find_by_id(created.id().unwrap())?;
//! let bats = store.find_all(&Filter::new().category("bats").limit(10))?;
//! ```

mod file;
mod filter;
mod in_memory;
mod record;
pub mod stamp;
mod store;

use std::fmt;

use crate::lock::LockError;

pub use file::FileRecordStore;
pub use filter::Filter;
pub use in_memory::InMemoryRecordStore;
pub use record::{Record, CREATED_AT, ID, UPDATED_AT};
pub use store::RecordStore;

/// Error type for record store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Reading or writing the durable container failed.
    Io {
        collection: String,
        operation: &'static str,
        message: String,
    },
    /// The container exists but does not hold a list of records.
    Malformed { collection: String, message: String },
    /// A record could not be converted to or from JSON.
    Serde(String),
    /// The collection lock could not be taken.
    Lock(LockError),
    /// A record with this id already exists in the collection.
    DuplicateId { collection: String, id: String },
}

impl StorageError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            StorageError::DuplicateId { .. } => 409,
            _ => 500,
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io {
                collection,
                operation,
                message,
            } => write!(f, "storage {} failed for {}: {}", operation, collection, message),
            StorageError::Malformed {
                collection,
                message,
            } => write!(f, "collection {} is malformed: {}", collection, message),
            StorageError::Serde(msg) => write!(f, "record serialization error: {}", msg),
            StorageError::Lock(e) => write!(f, "collection lock error: {}", e),
            StorageError::DuplicateId { collection, id } => {
                write!(f, "record {} already exists in {}", id, collection)
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Lock(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LockError> for StorageError {
    fn from(err: LockError) -> Self {
        StorageError::Lock(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serde(err.to_string())
    }
}
