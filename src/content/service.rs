use std::marker::PhantomData;
use std::sync::Mutex;

use tracing::{info, warn};

use super::{Collection, Updatable};
use crate::error::ServiceError;
use crate::model::{Filter, Record, RecordStore, StorageError};
use crate::validation::{NewRecord, Patch};

/// Validated CRUD over one collection of kind `C`, backed by store `S`.
///
/// The first public call seeds an empty collection with `C::SEED`. Every
/// record leaving the service is projected through `C::View`.
pub struct ContentService<C, S> {
    store: S,
    seeded: Mutex<bool>,
    _kind: PhantomData<fn() -> C>,
}

impl<C, S> ContentService<C, S>
where
    C: Collection,
    S: RecordStore,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            seeded: Mutex::new(false),
            _kind: PhantomData,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Records matching `filter`, ordered for the kind, capped by `filter.limit`.
    pub fn list(&self, filter: &Filter) -> Result<Vec<C::View>, ServiceError> {
        self.ensure_seeded()?;
        let mut records = self.store.find_all(&filter.without_limit())?;
        C::order(&mut records);
        if let Some(limit) = filter.limit {
            records.truncate(limit);
        }
        records.iter().map(|r| self.view(r)).collect()
    }

    pub fn get(&self, id: &str) -> Result<C::View, ServiceError> {
        self.ensure_seeded()?;
        match self.store.find_by_id(id)? {
            Some(record) => self.view(&record),
            None => Err(ServiceError::NotFound(C::LABEL)),
        }
    }

    pub fn create(&self, new: NewRecord<C>) -> Result<C::View, ServiceError> {
        let record = self.insert(new)?;
        self.view(&record)
    }

    /// Remove the record with `id`; `NotFound` when there is none.
    pub fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.ensure_seeded()?;
        if self.store.delete(id)? {
            info!(collection = C::NAME, id, "record deleted");
            Ok(())
        } else {
            Err(ServiceError::NotFound(C::LABEL))
        }
    }

    pub fn count(&self, filter: &Filter) -> Result<usize, ServiceError> {
        self.ensure_seeded()?;
        Ok(self.store.count(filter)?)
    }

    /// Read the collection without seeding it. Used by health checks.
    pub fn probe(&self) -> Result<usize, ServiceError> {
        Ok(self.store.load_all()?.len())
    }

    pub(super) fn insert(&self, new: NewRecord<C>) -> Result<Record, ServiceError> {
        self.ensure_seeded()?;
        let record = self.store.create(new.into_record())?;
        info!(collection = C::NAME, id = record.id(), "record created");
        Ok(record)
    }

    pub(super) fn records(&self, filter: &Filter) -> Result<Vec<Record>, ServiceError> {
        self.ensure_seeded()?;
        Ok(self.store.find_all(filter)?)
    }

    pub(super) fn view(&self, record: &Record) -> Result<C::View, ServiceError> {
        serde_json::from_value(record.to_value()).map_err(|err| {
            ServiceError::Storage(StorageError::Malformed {
                collection: C::NAME.to_string(),
                message: format!("record {}: {}", record.id().unwrap_or("<no id>"), err),
            })
        })
    }

    fn ensure_seeded(&self) -> Result<(), ServiceError> {
        let mut seeded = self
            .seeded
            .lock()
            .map_err(|_| ServiceError::Internal(format!("{} seed flag poisoned", C::NAME)))?;
        if *seeded {
            return Ok(());
        }

        let records: Vec<Record> = serde_json::from_str(C::SEED).map_err(StorageError::from)?;
        if self.store.seed_if_empty(records)? {
            info!(collection = C::NAME, "empty collection seeded with sample records");
        }
        *seeded = true;
        Ok(())
    }
}

impl<C, S> ContentService<C, S>
where
    C: Updatable,
    S: RecordStore,
{
    /// Merge `patch` onto the record with `id`.
    pub fn update(&self, id: &str, patch: Patch<C>) -> Result<C::View, ServiceError> {
        self.ensure_seeded()?;
        match self.store.update(id, patch.into_record())? {
            Some(record) => {
                info!(collection = C::NAME, id, "record updated");
                self.view(&record)
            }
            None => {
                warn!(collection = C::NAME, id, "update of unknown record");
                Err(ServiceError::NotFound(C::LABEL))
            }
        }
    }
}
