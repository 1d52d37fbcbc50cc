//! RecordStore: whole-collection CRUD over a durable container.

use std::sync::MutexGuard;

use tracing::debug;

use super::{stamp, Filter, Record, StorageError, CREATED_AT, ID, UPDATED_AT};
use crate::lock::CollectionLock;

/// CRUD access to one named collection.
///
/// Implementors supply the raw container access (`read_unlocked`,
/// `write_unlocked`) and the collection lock. The provided operations take the
/// lock, load the full collection, apply the change and rewrite the full
/// collection, so each call is atomic with respect to other calls in the same
/// process.
pub trait RecordStore: Send + Sync {
    /// The collection name (e.g. `"events"`).
    fn collection(&self) -> &str;

    /// The lock shared by every handle on this collection.
    fn collection_lock(&self) -> &CollectionLock;

    /// Read the full collection. Callers must hold the collection lock.
    ///
    /// A container that does not exist yet is initialised to an empty
    /// collection and persisted.
    fn read_unlocked(&self) -> Result<Vec<Record>, StorageError>;

    /// Overwrite the full collection. Callers must hold the collection lock.
    fn write_unlocked(&self, records: &[Record]) -> Result<(), StorageError>;

    /// Take the collection lock until the guard is dropped.
    fn lock_collection(&self) -> Result<MutexGuard<'_, ()>, StorageError> {
        Ok(self.collection_lock().acquire(self.collection())?)
    }

    /// Load every record in stored order.
    fn load_all(&self) -> Result<Vec<Record>, StorageError> {
        let _guard = self.lock_collection()?;
        self.read_unlocked()
    }

    /// Replace the stored collection with `records`.
    fn save_all(&self, records: &[Record]) -> Result<(), StorageError> {
        let _guard = self.lock_collection()?;
        self.write_unlocked(records)
    }

    /// Records passing `filter`, in stored order, capped by `filter.limit`.
    fn find_all(&self, filter: &Filter) -> Result<Vec<Record>, StorageError> {
        let records = self.load_all()?;
        Ok(filter.apply(records))
    }

    /// The first record whose id equals `id`.
    fn find_by_id(&self, id: &str) -> Result<Option<Record>, StorageError> {
        let records = self.load_all()?;
        Ok(records.into_iter().find(|r| r.id() == Some(id)))
    }

    /// Append a record, assigning `id` and `createdAt` when absent.
    ///
    /// Fails with `DuplicateId` when the caller supplied an id that is
    /// already taken.
    fn create(&self, mut record: Record) -> Result<Record, StorageError> {
        let _guard = self.lock_collection()?;
        let mut records = self.read_unlocked()?;

        match record.id().map(str::to_string) {
            Some(id) => {
                if records.iter().any(|r| r.id() == Some(id.as_str())) {
                    return Err(StorageError::DuplicateId {
                        collection: self.collection().to_string(),
                        id,
                    });
                }
            }
            None => {
                let id = stamp::next_id(|candidate| records.iter().any(|r| r.id() == Some(candidate)));
                record.set(ID, id);
            }
        }
        if record.created_at().is_none() {
            record.set(CREATED_AT, stamp::timestamp_now());
        }

        records.push(record.clone());
        self.write_unlocked(&records)?;
        debug!(collection = self.collection(), id = record.id(), "record created");
        Ok(record)
    }

    /// Shallow-merge `patch` onto the record with `id` and stamp `updatedAt`.
    ///
    /// Returns `None` when no record has that id.
    fn update(&self, id: &str, patch: Record) -> Result<Option<Record>, StorageError> {
        let _guard = self.lock_collection()?;
        let mut records = self.read_unlocked()?;

        let Some(current) = records.iter_mut().find(|r| r.id() == Some(id)) else {
            return Ok(None);
        };
        let updated_at = {
            let earlier: Vec<&str> = [current.created_at(), current.updated_at()]
                .into_iter()
                .flatten()
                .collect();
            stamp::timestamp_after(&earlier)
        };
        current.merge(patch);
        current.set(UPDATED_AT, updated_at);
        let updated = current.clone();

        self.write_unlocked(&records)?;
        debug!(collection = self.collection(), id, "record updated");
        Ok(Some(updated))
    }

    /// Remove the first record with `id`. Returns whether one was removed.
    fn delete(&self, id: &str) -> Result<bool, StorageError> {
        let _guard = self.lock_collection()?;
        let mut records = self.read_unlocked()?;

        let Some(position) = records.iter().position(|r| r.id() == Some(id)) else {
            return Ok(false);
        };
        records.remove(position);

        self.write_unlocked(&records)?;
        debug!(collection = self.collection(), id, "record deleted");
        Ok(true)
    }

    /// Number of records `find_all(filter)` would return.
    fn count(&self, filter: &Filter) -> Result<usize, StorageError> {
        Ok(self.find_all(filter)?.len())
    }

    /// Write `records` as the initial content of an empty collection.
    ///
    /// The emptiness check and the write happen under one lock, so racing
    /// callers seed at most once. Returns whether anything was written.
    fn seed_if_empty(&self, records: Vec<Record>) -> Result<bool, StorageError> {
        let _guard = self.lock_collection()?;
        if records.is_empty() || !self.read_unlocked()?.is_empty() {
            return Ok(false);
        }

        let created_at = stamp::timestamp_now();
        let records: Vec<Record> = records
            .into_iter()
            .map(|mut record| {
                if record.id().is_none() {
                    record.set(ID, stamp::next_id(|_| false));
                }
                if record.created_at().is_none() {
                    record.set(CREATED_AT, created_at.clone());
                }
                record
            })
            .collect();

        self.write_unlocked(&records)?;
        debug!(collection = self.collection(), count = records.len(), "collection seeded");
        Ok(true)
    }
}
