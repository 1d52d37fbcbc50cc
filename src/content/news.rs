use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{newest_first, Collection, Updatable};
use crate::model::Record;
use crate::validation::{self, NewRecord, Patch, ValidationError};

/// Announcements and articles, listed newest first.
#[derive(Debug, Clone, Copy)]
pub struct News;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsView {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Collection for News {
    const NAME: &'static str = "news";
    const LABEL: &'static str = "News article";
    const SEED: &'static str = include_str!("seeds/news.json");

    type View = NewsView;

    fn validate(candidate: &Value) -> Result<NewRecord<Self>, ValidationError> {
        validation::news::validate(candidate)
    }

    fn order(records: &mut [Record]) {
        newest_first(records);
    }
}

impl Updatable for News {
    fn validate_patch(candidate: &Value) -> Result<Patch<Self>, ValidationError> {
        validation::news::validate_patch(candidate)
    }
}
