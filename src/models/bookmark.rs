use chrono::{DateTime, Local};
use serde::Serialize;

use super::timestamp::serialize_iso;

/// A saved bookmark with the breadcrumb of folders containing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookmarkRecord {
    #[serde(rename = "Timestamp", serialize_with = "serialize_iso")]
    pub timestamp: DateTime<Local>,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Folder")]
    pub folder: String,
}

impl BookmarkRecord {
    pub fn new(timestamp: DateTime<Local>, url: impl Into<String>, title: impl Into<String>, folder: impl Into<String>) -> Self {
        Self { timestamp, url: url.into(), title: title.into(), folder: folder.into() }
    }
}
