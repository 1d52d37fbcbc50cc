//! Gallery item rules.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::fields::{Fields, Mode, Text};
use super::{NewRecord, ValidationError};
use crate::content::Gallery;
use crate::model::Record;

static CATEGORY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9-]+$").expect("category pattern is valid"));

pub fn validate(candidate: &Value) -> Result<NewRecord<Gallery>, ValidationError> {
    check(candidate, Mode::Create).map(NewRecord::new)
}

fn check(candidate: &Value, mode: Mode) -> Result<Record, ValidationError> {
    let mut fields = Fields::new(candidate, mode)?;
    let mut record = Record::new();

    if let Some(title) = fields.text("title", "Title", Text::required(1, 200)) {
        record.set("title", title);
    }
    let image = fields.media_path("image", "Image", "/images/");
    let video = fields.media_path("video", "Video", "/videos/");
    if mode == Mode::Create && image.is_none() && video.is_none() && !has_media_error(&fields) {
        fields.reject("image", "Either an image or a video is required");
    }
    if let Some(image) = image {
        record.set("image", image);
    }
    if let Some(video) = video {
        record.set("video", video);
    }
    if let Some(description) = fields.text("description", "Description", Text::optional(1000)) {
        record.set("description", description);
    }
    if let Some(category) = fields.text("category", "Category", Text::optional(50)) {
        if CATEGORY.is_match(&category) {
            record.set("category", category);
        } else {
            fields.reject(
                "category",
                "Category may only contain lowercase letters, numbers, and hyphens",
            );
        }
    }

    fields.finish(record)
}

fn has_media_error(fields: &Fields<'_>) -> bool {
    fields.has_error("image") || fields.has_error("video")
}
