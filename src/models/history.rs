use chrono::{DateTime, Local};
use serde::Serialize;

use super::timestamp::serialize_iso;

/// One page visit
///
/// `title` is absent for adapters whose query does not filter untitled rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRecord {
    #[serde(rename = "Timestamp", serialize_with = "serialize_iso")]
    pub timestamp: DateTime<Local>,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Title")]
    pub title: Option<String>,
}

impl HistoryRecord {
    pub fn new(timestamp: DateTime<Local>, url: impl Into<String>, title: Option<String>) -> Self {
        Self { timestamp, url: url.into(), title }
    }

    /// Title with missing values treated as empty, the ordering key used for sorting
    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }
}
