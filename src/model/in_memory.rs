//! InMemoryRecordStore: Vec-backed record store for tests and development.

use std::sync::{Arc, RwLock};

use super::{Record, RecordStore, StorageError};
use crate::lock::{CollectionLock, LockError};

/// In-memory record store. Clone-friendly via Arc; clones share records
/// and the collection lock.
#[derive(Clone)]
pub struct InMemoryRecordStore {
    collection: String,
    records: Arc<RwLock<Vec<Record>>>,
    lock: CollectionLock,
}

impl InMemoryRecordStore {
    /// Create an empty store for `collection`.
    pub fn new(collection: &str) -> Self {
        Self::with_records(collection, Vec::new())
    }

    /// Create a store pre-populated with `records`.
    pub fn with_records(collection: &str, records: Vec<Record>) -> Self {
        Self {
            collection: collection.to_string(),
            records: Arc::new(RwLock::new(records)),
            lock: CollectionLock::new(),
        }
    }
}

impl RecordStore for InMemoryRecordStore {
    fn collection(&self) -> &str {
        &self.collection
    }

    fn collection_lock(&self) -> &CollectionLock {
        &self.lock
    }

    fn read_unlocked(&self) -> Result<Vec<Record>, StorageError> {
        let records = self
            .records
            .read()
            .map_err(|_| LockError::Poisoned(self.collection.clone()))?;
        Ok(records.clone())
    }

    fn write_unlocked(&self, records: &[Record]) -> Result<(), StorageError> {
        let mut stored = self
            .records
            .write()
            .map_err(|_| LockError::Poisoned(self.collection.clone()))?;
        *stored = records.to_vec();
        Ok(())
    }
}
