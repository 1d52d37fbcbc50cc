use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use super::{Collection, ContentService, Updatable};
use crate::error::ServiceError;
use crate::model::{stamp, Filter, RecordStore};
use crate::validation::{self, NewRecord, Patch, ValidationError};

/// Concerts and shows.
#[derive(Debug, Clone, Copy)]
pub struct Events;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Collection for Events {
    const NAME: &'static str = "events";
    const LABEL: &'static str = "Event";
    const STATUSES: &'static [&'static str] = validation::event::STATUSES;
    const SEED: &'static str = include_str!("seeds/events.json");

    type View = EventView;

    fn validate(candidate: &Value) -> Result<NewRecord<Self>, ValidationError> {
        validation::event::validate(candidate)
    }
}

impl Updatable for Events {
    fn validate_patch(candidate: &Value) -> Result<Patch<Self>, ValidationError> {
        validation::event::validate_patch(candidate)
    }
}

impl<S: RecordStore> ContentService<Events, S> {
    /// Events still marked `upcoming` whose date is after `now`, soonest first.
    pub fn upcoming(&self, now: DateTime<Utc>) -> Result<Vec<EventView>, ServiceError> {
        let filter = Filter::new().status(validation::event::DEFAULT_STATUS);
        let mut dated: Vec<_> = self
            .records(&filter)?
            .into_iter()
            .filter_map(|record| {
                let date = record.get_str("date").and_then(stamp::parse_timestamp)?;
                (date > now).then_some((date, record))
            })
            .collect();
        dated.sort_by_key(|(date, _)| *date);
        dated.iter().map(|(_, record)| self.view(record)).collect()
    }
}
