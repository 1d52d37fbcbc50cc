//! Field rule helpers shared by the per-kind validators.

use serde_json::{Map, Number, Value};

use super::{FieldError, ValidationError};
use crate::model::{stamp, Record};

/// Whether a candidate describes a new record or a partial change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    Create,
    Patch,
}

/// Length bounds for a text field, counted in characters.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Text {
    pub required: bool,
    pub min: usize,
    pub max: usize,
}

impl Text {
    pub fn required(min: usize, max: usize) -> Self {
        Self {
            required: true,
            min,
            max,
        }
    }

    pub fn optional(max: usize) -> Self {
        Self {
            required: false,
            min: 0,
            max,
        }
    }
}

/// Walks a candidate object field by field, collecting every failure.
pub(crate) struct Fields<'a> {
    input: &'a Map<String, Value>,
    mode: Mode,
    errors: Vec<FieldError>,
}

impl<'a> Fields<'a> {
    pub fn new(candidate: &'a Value, mode: Mode) -> Result<Self, ValidationError> {
        let input = candidate.as_object().ok_or_else(|| {
            ValidationError::single("Validation failed", "body", "Request body must be a JSON object")
        })?;
        Ok(Self {
            input,
            mode,
            errors: Vec::new(),
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn reject(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// The raw value; JSON `null` counts as absent.
    fn raw(&self, field: &str) -> Option<&'a Value> {
        self.input.get(field).filter(|v| !v.is_null())
    }

    fn is_required(&self, required: bool) -> bool {
        required && self.mode == Mode::Create
    }

    /// A trimmed string within `rule`'s bounds.
    pub fn text(&mut self, field: &str, label: &str, rule: Text) -> Option<String> {
        let Some(value) = self.raw(field) else {
            if self.is_required(rule.required) {
                self.reject(field, format!("{} is required", label));
            }
            return None;
        };
        let Some(text) = value.as_str() else {
            self.reject(field, format!("{} must be a string", label));
            return None;
        };
        let text = text.trim();
        let length = text.chars().count();

        if text.is_empty() {
            if rule.required {
                self.reject(field, format!("{} is required", label));
            }
            return None;
        }
        if length < rule.min || length > rule.max {
            if rule.min > 0 {
                self.reject(
                    field,
                    format!("{} must be between {} and {} characters", label, rule.min, rule.max),
                );
            } else {
                self.reject(field, format!("{} must not exceed {} characters", label, rule.max));
            }
            return None;
        }
        Some(text.to_string())
    }

    /// A public media path: begins with `prefix`, no `..`, no `//`.
    pub fn media_path(&mut self, field: &str, label: &str, prefix: &str) -> Option<String> {
        let path = self.text(field, label, Text::optional(500))?;
        if !path.starts_with(prefix) {
            self.reject(field, format!("{} path must start with {}", label, prefix));
            return None;
        }
        if path.contains("..") || path.contains("//") {
            self.reject(field, format!("Invalid {} path", label.to_lowercase()));
            return None;
        }
        Some(path)
    }

    /// A string from a fixed set of values.
    pub fn one_of(&mut self, field: &str, label: &str, allowed: &[&str]) -> Option<String> {
        let value = self.text(field, label, Text::optional(100))?;
        if allowed.contains(&value.as_str()) {
            Some(value)
        } else {
            self.reject(field, format!("{} must be one of: {}", label, allowed.join(", ")));
            None
        }
    }

    /// A boolean; the strings `"true"`/`"false"` are accepted.
    pub fn boolean(&mut self, field: &str, label: &str) -> Option<bool> {
        match self.raw(field)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) if s.trim() == "true" => Some(true),
            Value::String(s) if s.trim() == "false" => Some(false),
            _ => {
                self.reject(field, format!("{} must be true or false", label));
                None
            }
        }
    }

    /// A non-negative number; numeric strings are accepted.
    pub fn non_negative_number(&mut self, field: &str, label: &str) -> Option<Number> {
        let number = match self.raw(field)? {
            Value::Number(n) => Some(n.clone()),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64),
            _ => None,
        };
        match number {
            Some(n) if n.as_f64().is_some_and(|v| v >= 0.0) => Some(n),
            _ => {
                self.reject(field, format!("{} must be a positive number", label));
                None
            }
        }
    }

    /// An ISO-8601 date or date-time, kept as the caller wrote it (trimmed).
    pub fn timestamp(&mut self, field: &str, label: &str, required: bool) -> Option<String> {
        let rule = if required {
            Text::required(1, 64)
        } else {
            Text::optional(64)
        };
        let value = self.text(field, label, rule)?;
        if stamp::parse_timestamp(&value).is_none() {
            self.reject(field, format!("Valid ISO8601 {} is required", label.to_lowercase()));
            return None;
        }
        Some(value)
    }

    /// Finish validation, returning the built record or every collected error.
    ///
    /// In patch mode a record without any field is an error.
    pub fn finish(self, record: Record) -> Result<Record, ValidationError> {
        if !self.errors.is_empty() {
            return Err(ValidationError::from_fields(self.errors));
        }
        if self.mode == Mode::Patch && record.is_empty() {
            return Err(ValidationError::single(
                "No updatable fields supplied",
                "body",
                "At least one updatable field is required",
            ));
        }
        Ok(record)
    }
}
