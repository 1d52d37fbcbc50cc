//! Contact form rules.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::fields::{Fields, Mode, Text};
use super::{NewRecord, ValidationError};
use crate::content::Contacts;
use crate::model::Record;

/// Triage states of a submission.
pub const STATUSES: &[&str] = &["new", "read", "archived"];

static NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z\s'-]+$").expect("name pattern is valid"));
static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));
static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\d\s\-+()]+$").expect("phone pattern is valid"));

pub fn validate(candidate: &Value) -> Result<NewRecord<Contacts>, ValidationError> {
    let mut fields = Fields::new(candidate, Mode::Create)?;
    let mut record = Record::new();

    if let Some(name) = fields.text("name", "Name", Text::required(2, 100)) {
        if NAME.is_match(&name) {
            record.set("name", name);
        } else {
            fields.reject(
                "name",
                "Name can only contain letters, spaces, hyphens, and apostrophes",
            );
        }
    }
    if let Some(email) = email(&mut fields) {
        record.set("email", email);
    }
    if let Some(phone) = fields.text("phone", "Phone", Text::optional(20)) {
        if PHONE.is_match(&phone) {
            record.set("phone", phone);
        } else {
            fields.reject("phone", "Please provide a valid phone number");
        }
    }
    if let Some(subject) = fields.text("subject", "Subject", Text::optional(200)) {
        record.set("subject", subject);
    }
    if let Some(message) = fields.text("message", "Message", Text::required(10, 5000)) {
        record.set("message", message);
    }
    record.set("status", "new");

    fields.finish(record).map(NewRecord::new)
}

fn email(fields: &mut Fields<'_>) -> Option<String> {
    let email = fields.text("email", "Email", Text::required(3, 255))?;
    if email.contains(['\r', '\n', '\0']) {
        fields.reject("email", "Email contains invalid characters");
        return None;
    }
    if !EMAIL.is_match(&email) {
        fields.reject("email", "Please provide a valid email address");
        return None;
    }
    Some(email.to_lowercase())
}
