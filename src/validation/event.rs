//! Event rules.

use serde_json::Value;

use super::fields::{Fields, Mode, Text};
use super::{NewRecord, Patch, ValidationError};
use crate::content::Events;
use crate::model::Record;

/// Lifecycle values an event may carry.
pub const STATUSES: &[&str] = &["upcoming", "past", "cancelled"];

/// Status given to an event created without one.
pub const DEFAULT_STATUS: &str = "upcoming";

pub fn validate(candidate: &Value) -> Result<NewRecord<Events>, ValidationError> {
    check(candidate, Mode::Create).map(NewRecord::new)
}

pub fn validate_patch(candidate: &Value) -> Result<Patch<Events>, ValidationError> {
    check(candidate, Mode::Patch).map(Patch::new)
}

fn check(candidate: &Value, mode: Mode) -> Result<Record, ValidationError> {
    let mut fields = Fields::new(candidate, mode)?;
    let mut record = Record::new();

    if let Some(title) = fields.text("title", "Title", Text::required(3, 200)) {
        record.set("title", title);
    }
    if let Some(date) = fields.timestamp("date", "Date", true) {
        record.set("date", date);
    }
    if let Some(venue) = fields.text("venue", "Venue", Text::required(2, 200)) {
        record.set("venue", venue);
    }
    if let Some(description) = fields.text("description", "Description", Text::optional(5000)) {
        record.set("description", description);
    }
    if let Some(image) = fields.media_path("image", "Image", "/images/") {
        record.set("image", image);
    }
    if let Some(price) = fields.non_negative_number("price", "Price") {
        record.set("price", price);
    }
    match fields.one_of("status", "Status", STATUSES) {
        Some(status) => record.set("status", status),
        None if fields.mode() == Mode::Create => record.set("status", DEFAULT_STATUS),
        None => {}
    }

    fields.finish(record)
}
