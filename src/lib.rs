pub mod config;
pub mod content;
mod error;
pub mod lock;
pub mod logging;
pub mod model;
pub mod validation;

#[cfg(feature = "http")]
pub mod http;

pub use config::{Config, ConfigError, Environment};
pub use content::{
    Collection, ContactReceipt, ContactView, Contacts, ContentService, EventView, Events, Gallery,
    GalleryView, News, NewsView, Updatable,
};
pub use error::{AuthError, ServiceError};
pub use model::{FileRecordStore, Filter, InMemoryRecordStore, Record, RecordStore, StorageError};
pub use validation::{FieldError, ValidationError};
