//! News article rules.

use serde_json::Value;

use super::fields::{Fields, Mode, Text};
use super::{NewRecord, Patch, ValidationError};
use crate::content::News;
use crate::model::Record;

pub fn validate(candidate: &Value) -> Result<NewRecord<News>, ValidationError> {
    check(candidate, Mode::Create).map(NewRecord::new)
}

pub fn validate_patch(candidate: &Value) -> Result<Patch<News>, ValidationError> {
    check(candidate, Mode::Patch).map(Patch::new)
}

fn check(candidate: &Value, mode: Mode) -> Result<Record, ValidationError> {
    let mut fields = Fields::new(candidate, mode)?;
    let mut record = Record::new();

    if let Some(title) = fields.text("title", "Title", Text::required(3, 200)) {
        record.set("title", title);
    }
    if let Some(content) = fields.text("content", "Content", Text::required(10, 50_000)) {
        record.set("content", content);
    }
    if let Some(author) = fields.text("author", "Author", Text::optional(100)) {
        record.set("author", author);
    }
    if let Some(image) = fields.media_path("image", "Image", "/images/") {
        record.set("image", image);
    }
    match fields.boolean("published", "Published") {
        Some(published) => record.set("published", published),
        None if fields.mode() == Mode::Create => record.set("published", true),
        None => {}
    }

    fields.finish(record)
}
