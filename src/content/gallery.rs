use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Collection;
use crate::validation::{self, NewRecord, ValidationError};

/// Photos and videos, grouped by band or theme through `category`.
#[derive(Debug, Clone, Copy)]
pub struct Gallery;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryView {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Collection for Gallery {
    const NAME: &'static str = "gallery";
    const LABEL: &'static str = "Gallery item";
    const SEED: &'static str = include_str!("seeds/gallery.json");

    type View = GalleryView;

    fn validate(candidate: &Value) -> Result<NewRecord<Self>, ValidationError> {
        validation::gallery::validate(candidate)
    }
}
