//! Collection locks: serialize load/modify/save cycles within one process.
//!
//! Every `RecordStore` operation reads the whole collection, possibly mutates
//! it, and writes it back. Two concurrent creates would otherwise load the
//! same snapshot and the second save would drop the first record. Holding a
//! `CollectionLock` for the whole cycle closes that window for callers inside
//! the same process.
//!
//! External writers touching the same file are not coordinated.
//!
//! ## Example
//!
//! ```ignore
//! use venue_content::lock::CollectionLocks;
//!
//! let locks = CollectionLocks::new();
//! let lock = locks.for_key("data/events.json")?;
//! let _guard = lock.acquire("events")?;
//! // load, mutate, save
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// Error type for lock operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockError {
    /// A thread panicked while holding the lock.
    Poisoned(String),
}

impl fmt::Display for LockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockError::Poisoned(what) => write!(f, "lock poisoned: {}", what),
        }
    }
}

impl std::error::Error for LockError {}

/// The lock guarding one collection. Clones share the same mutex.
#[derive(Clone, Default)]
pub struct CollectionLock(Arc<Mutex<()>>);

impl CollectionLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until the lock is free. It is released when the guard drops.
    pub fn acquire(&self, collection: &str) -> Result<MutexGuard<'_, ()>, LockError> {
        self.0
            .lock()
            .map_err(|_| LockError::Poisoned(collection.to_string()))
    }

    /// True when both handles guard the same collection.
    pub fn same_as(&self, other: &CollectionLock) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Hands out one `CollectionLock` per key, creating it on first use.
#[derive(Default)]
pub struct CollectionLocks {
    locks: Mutex<HashMap<String, CollectionLock>>,
}

impl CollectionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_key(&self, key: &str) -> Result<CollectionLock, LockError> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| LockError::Poisoned("collection lock map".into()))?;
        Ok(locks.entry(key.to_string()).or_default().clone())
    }
}
