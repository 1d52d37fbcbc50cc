use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{newest_first, Collection, ContentService};
use crate::error::ServiceError;
use crate::model::{Record, RecordStore};
use crate::validation::{self, NewRecord, ValidationError};

/// Messages sent through the public contact form.
#[derive(Debug, Clone, Copy)]
pub struct Contacts;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactView {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// What the submitter gets back: enough to reference the message, nothing more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactReceipt {
    pub id: String,
    pub name: String,
}

impl Collection for Contacts {
    const NAME: &'static str = "contacts";
    const LABEL: &'static str = "Contact";
    const STATUSES: &'static [&'static str] = validation::contact::STATUSES;

    type View = ContactView;

    fn validate(candidate: &Value) -> Result<NewRecord<Self>, ValidationError> {
        validation::contact::validate(candidate)
    }

    fn order(records: &mut [Record]) {
        newest_first(records);
    }
}

impl<S: RecordStore> ContentService<Contacts, S> {
    /// Store a contact form submission.
    pub fn submit(&self, new: NewRecord<Contacts>) -> Result<ContactReceipt, ServiceError> {
        let record = self.insert(new)?;
        let id = record
            .id()
            .ok_or_else(|| ServiceError::Internal("stored contact has no id".to_string()))?;
        Ok(ContactReceipt {
            id: id.to_string(),
            name: record.get_str("name").unwrap_or_default().to_string(),
        })
    }
}
