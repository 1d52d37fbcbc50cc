//! Input validation: one module per record kind.
//!
//! Each kind exposes pure functions turning caller JSON into a checked
//! record. The result types (`NewRecord`, `Patch`) can only be built here, so
//! a service receiving one knows the input already passed validation.
//!
//! ```ignore
//! let new_event = validation::event::validate(&body)?;
//! events.create(new_event)?;
//! ```

pub mod contact;
pub mod event;
mod fields;
pub mod gallery;
pub mod news;
pub mod query;

use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;

use crate::model::Record;

pub use query::{list_filter, record_id, ListQuery};

/// One failed field rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Caller input failed one or more field rules. Always safe to show to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Summary message (the first failed rule).
    pub message: String,
    /// Every failed rule, in field order.
    pub details: Vec<FieldError>,
}

impl ValidationError {
    /// Build from collected field errors; the first one becomes the summary.
    pub fn from_fields(details: Vec<FieldError>) -> Self {
        let message = details
            .first()
            .map(|d| d.message.clone())
            .unwrap_or_else(|| "Validation failed".to_string());
        Self { message, details }
    }

    /// A single-field failure with its own summary message.
    pub fn single(summary: &str, field: &str, message: impl Into<String>) -> Self {
        Self {
            message: summary.to_string(),
            details: vec![FieldError::new(field, message)],
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed: {}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// A validated record ready to be created in the collection of kind `C`.
#[derive(Debug, Clone)]
pub struct NewRecord<C> {
    record: Record,
    _kind: PhantomData<fn() -> C>,
}

impl<C> NewRecord<C> {
    pub(crate) fn new(record: Record) -> Self {
        Self {
            record,
            _kind: PhantomData,
        }
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn into_record(self) -> Record {
        self.record
    }
}

/// A validated, non-empty set of field changes for a record of kind `C`.
#[derive(Debug, Clone)]
pub struct Patch<C> {
    record: Record,
    _kind: PhantomData<fn() -> C>,
}

impl<C> Patch<C> {
    pub(crate) fn new(record: Record) -> Self {
        Self {
            record,
            _kind: PhantomData,
        }
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn into_record(self) -> Record {
        self.record
    }
}
