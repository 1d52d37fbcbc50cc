//! FileRecordStore: one pretty-printed JSON file per collection.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use tracing::{debug, error, info};

use super::{Record, RecordStore, StorageError};
use crate::lock::{CollectionLock, CollectionLocks};

/// Locks shared by every `FileRecordStore` in the process, keyed by file path.
static FILE_LOCKS: Lazy<CollectionLocks> = Lazy::new(CollectionLocks::new);

/// Record store persisting a collection to `<data_dir>/<collection>.json`.
///
/// The file holds a JSON array of objects. Writes go to a sibling temp file
/// which is synced and then renamed over the target, so a crash mid-write
/// leaves the previous contents in place.
///
/// Handles opened on the same path share one lock.
pub struct FileRecordStore {
    collection: String,
    path: PathBuf,
    lock: CollectionLock,
}

impl FileRecordStore {
    /// Open (without touching the disk) the store for `collection` under `data_dir`.
    pub fn open(data_dir: impl AsRef<Path>, collection: &str) -> Result<Self, StorageError> {
        let path = data_dir.as_ref().join(format!("{}.json", collection));
        let key = std::path::absolute(&path).unwrap_or_else(|_| path.clone());
        let lock = FILE_LOCKS.for_key(&key.to_string_lossy())?;
        Ok(Self {
            collection: collection.to_string(),
            path,
            lock,
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    fn io_error(&self, operation: &'static str, err: io::Error) -> StorageError {
        error!(
            collection = %self.collection,
            path = %self.path.display(),
            operation,
            error = %err,
            "collection storage failure"
        );
        StorageError::Io {
            collection: self.collection.clone(),
            operation,
            message: err.to_string(),
        }
    }

    fn ensure_data_dir(&self) -> Result<(), StorageError> {
        let Some(dir) = self.path.parent() else {
            return Ok(());
        };
        if dir.as_os_str().is_empty() || dir.exists() {
            return Ok(());
        }
        fs::create_dir_all(dir).map_err(|e| self.io_error("create data directory", e))?;
        info!(path = %dir.display(), "created data directory");
        Ok(())
    }

    fn write_atomically(&self, bytes: &[u8]) -> io::Result<()> {
        let temp = self.temp_path();
        let result = (|| {
            let mut file = fs::File::create(&temp)?;
            file.write_all(bytes)?;
            file.sync_all()?;
            fs::rename(&temp, &self.path)
        })();
        if result.is_err() {
            let _ = fs::remove_file(&temp);
            return result;
        }
        self.sync_parent_dir()
    }

    /// Persist the rename itself by syncing the containing directory.
    #[cfg(unix)]
    fn sync_parent_dir(&self) -> io::Result<()> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => fs::File::open(dir)?.sync_all(),
            _ => fs::File::open(".")?.sync_all(),
        }
    }

    #[cfg(not(unix))]
    fn sync_parent_dir(&self) -> io::Result<()> {
        Ok(())
    }
}

impl RecordStore for FileRecordStore {
    fn collection(&self) -> &str {
        &self.collection
    }

    fn collection_lock(&self) -> &CollectionLock {
        &self.lock
    }

    fn read_unlocked(&self) -> Result<Vec<Record>, StorageError> {
        self.ensure_data_dir()?;

        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.write_unlocked(&[])?;
                info!(collection = %self.collection, path = %self.path.display(), "initialised empty collection");
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.io_error("read", e)),
        };

        let records: Vec<Record> = serde_json::from_slice(&bytes).map_err(|e| {
            error!(
                collection = %self.collection,
                path = %self.path.display(),
                error = %e,
                "collection file is not a list of records"
            );
            StorageError::Malformed {
                collection: self.collection.clone(),
                message: e.to_string(),
            }
        })?;

        debug!(collection = %self.collection, count = records.len(), "loaded collection");
        Ok(records)
    }

    fn write_unlocked(&self, records: &[Record]) -> Result<(), StorageError> {
        self.ensure_data_dir()?;
        let bytes = serde_json::to_vec_pretty(records)?;
        self.write_atomically(&bytes)
            .map_err(|e| self.io_error("write", e))?;
        debug!(collection = %self.collection, count = records.len(), "saved collection");
        Ok(())
    }
}
