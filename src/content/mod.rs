//! Collection services.
//!
//! A [`Collection`] describes one record kind: its collection name, seed
//! records, validation entry point and the view returned to callers.
//! [`ContentService`] layers those onto any [`RecordStore`](crate::model::RecordStore).

mod contacts;
mod events;
mod gallery;
mod news;
mod service;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::model::{stamp, Record};
use crate::validation::{NewRecord, Patch, ValidationError};

pub use contacts::{ContactReceipt, ContactView, Contacts};
pub use events::{EventView, Events};
pub use gallery::{Gallery, GalleryView};
pub use news::{News, NewsView};
pub use service::ContentService;

/// One kind of content record.
pub trait Collection: Send + Sync + Sized + 'static {
    /// Collection (and file) name, e.g. `"events"`.
    const NAME: &'static str;

    /// Human label used in messages, e.g. `"Event"`.
    const LABEL: &'static str;

    /// Values a `status` filter may take; empty when the kind has no status.
    const STATUSES: &'static [&'static str] = &[];

    /// Records written into an empty collection on first use (JSON array).
    const SEED: &'static str = "[]";

    /// The allow-listed shape returned to callers.
    type View: Serialize + DeserializeOwned + Send + 'static;

    fn validate(candidate: &Value) -> Result<NewRecord<Self>, ValidationError>;

    /// Reorder a listing before the limit is applied. Store order by default.
    fn order(_records: &mut [Record]) {}
}

/// A kind whose records may be changed after creation.
pub trait Updatable: Collection {
    fn validate_patch(candidate: &Value) -> Result<Patch<Self>, ValidationError>;
}

/// Sort newest `createdAt` first; unparseable stamps go last. Stable.
pub(crate) fn newest_first(records: &mut [Record]) {
    records.sort_by_cached_key(|r| {
        std::cmp::Reverse(r.created_at().and_then(stamp::parse_timestamp))
    });
}
