//! Query-string and path-parameter rules.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use super::{FieldError, ValidationError};
use crate::model::Filter;

/// Largest page a list request may ask for.
pub const MAX_LIMIT: usize = 100;

static RECORD_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,100}$").expect("id pattern is valid"));
static CATEGORY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9_-]+$").expect("category pattern is valid"));

/// Raw list parameters as they arrive on the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub status: Option<String>,
    pub published: Option<String>,
    pub limit: Option<String>,
}

/// Turn list parameters into a store filter.
///
/// `statuses` is the kind's status set; an empty set rejects any status filter.
pub fn list_filter(query: &ListQuery, statuses: &[&str]) -> Result<Filter, ValidationError> {
    let mut filter = Filter::new();
    let mut errors = Vec::new();

    if let Some(category) = present(&query.category) {
        if CATEGORY.is_match(category) {
            filter = filter.category(category);
        } else {
            errors.push(FieldError::new("category", "Invalid category format"));
        }
    }
    if let Some(status) = present(&query.status) {
        if statuses.contains(&status) {
            filter = filter.status(status);
        } else {
            errors.push(FieldError::new("status", "Invalid status value"));
        }
    }
    if let Some(published) = present(&query.published) {
        match published {
            "true" | "1" => filter = filter.published(true),
            "false" | "0" => filter = filter.published(false),
            _ => errors.push(FieldError::new("published", "Published must be a boolean")),
        }
    }
    if let Some(limit) = present(&query.limit) {
        match limit.parse::<usize>() {
            Ok(n) if (1..=MAX_LIMIT).contains(&n) => filter = filter.limit(n),
            _ => errors.push(FieldError::new(
                "limit",
                format!("Limit must be between 1 and {}", MAX_LIMIT),
            )),
        }
    }

    if errors.is_empty() {
        Ok(filter)
    } else {
        Err(ValidationError {
            message: "Invalid query parameters".to_string(),
            details: errors,
        })
    }
}

/// Check an `:id` path parameter.
pub fn record_id(id: &str) -> Result<&str, ValidationError> {
    if RECORD_ID.is_match(id) {
        Ok(id)
    } else {
        Err(ValidationError::single(
            "Invalid ID parameter",
            "id",
            "ID must be 1-100 letters, digits, hyphens or underscores",
        ))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
