//! Filter: equality filters plus a result cap for `find_all`/`count`.

use super::Record;

/// Optional filters, ANDed together; `limit` is applied last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub category: Option<String>,
    pub status: Option<String>,
    pub published: Option<bool>,
    pub limit: Option<usize>,
}

impl Filter {
    /// A filter that matches every record.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn published(mut self, published: bool) -> Self {
        self.published = Some(published);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The same filter with the cap removed.
    pub fn without_limit(&self) -> Self {
        Self {
            limit: None,
            ..self.clone()
        }
    }

    /// Whether a record passes the equality filters (the cap is not considered).
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(category) = &self.category {
            if record.get_str("category") != Some(category.as_str()) {
                return false;
            }
        }
        if let Some(status) = &self.status {
            if record.get_str("status") != Some(status.as_str()) {
                return false;
            }
        }
        if let Some(published) = self.published {
            if record.get_bool("published") != Some(published) {
                return false;
            }
        }
        true
    }

    /// Keep matching records in their existing order, then truncate to the cap.
    pub fn apply(&self, records: Vec<Record>) -> Vec<Record> {
        let mut matched: Vec<Record> = records.into_iter().filter(|r| self.matches(r)).collect();
        if let Some(limit) = self.limit {
            matched.truncate(limit);
        }
        matched
    }
}
