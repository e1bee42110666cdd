use std::cmp::Ordering;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::models::{BookmarkRecord, CookieRecord, HistoryRecord};

/// CSV timestamp layout; the offset is implied by the local zone
pub const CSV_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Shape shared by every record kind an [`Outputs`](super::Outputs) collection can hold
pub trait Record: Clone + Serialize {
    /// Key of the top-level JSON object
    const KIND: &'static str;
    /// Column names, in serialization order
    const FIELDS: &'static [&'static str];

    /// URL-ish value used for domain grouping
    fn url(&self) -> &str;

    /// One CSV row, aligned with [`Record::FIELDS`]
    fn csv_row(&self) -> Vec<String>;

    /// Null-safe ordering used by [`Outputs::sort`](super::Outputs::sort)
    fn sort_cmp(&self, other: &Self) -> Ordering;
}

fn csv_timestamp(ts: &DateTime<Local>) -> String {
    ts.format(CSV_TIMESTAMP_FORMAT).to_string()
}

impl Record for HistoryRecord {
    const KIND: &'static str = "history";
    const FIELDS: &'static [&'static str] = &["Timestamp", "URL", "Title"];

    fn url(&self) -> &str {
        &self.url
    }

    fn csv_row(&self) -> Vec<String> {
        vec![csv_timestamp(&self.timestamp), self.url.clone(), self.title_or_empty().to_string()]
    }

    fn sort_cmp(&self, other: &Self) -> Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then_with(|| self.url.cmp(&other.url))
            .then_with(|| self.title_or_empty().cmp(other.title_or_empty()))
    }
}

impl Record for BookmarkRecord {
    const KIND: &'static str = "bookmarks";
    const FIELDS: &'static [&'static str] = &["Timestamp", "URL", "Title", "Folder"];

    fn url(&self) -> &str {
        &self.url
    }

    fn csv_row(&self) -> Vec<String> {
        vec![csv_timestamp(&self.timestamp), self.url.clone(), self.title.clone(), self.folder.clone()]
    }

    fn sort_cmp(&self, other: &Self) -> Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then_with(|| self.url.cmp(&other.url))
            .then_with(|| self.title.cmp(&other.title))
            .then_with(|| self.folder.cmp(&other.folder))
    }
}

impl Record for CookieRecord {
    const KIND: &'static str = "cookies";
    const FIELDS: &'static [&'static str] = &["Name", "Host", "Path", "Value", "Expires", "Secure", "HttpOnly"];

    // Hosts are stored as cookie domains (".example.com"), not URLs
    fn url(&self) -> &str {
        &self.host
    }

    fn csv_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.host.clone(),
            self.path.clone(),
            self.value.clone(),
            self.expires.as_ref().map(csv_timestamp).unwrap_or_default(),
            self.secure.to_string(),
            self.http_only.to_string(),
        ]
    }

    fn sort_cmp(&self, other: &Self) -> Ordering {
        self.host
            .cmp(&other.host)
            .then_with(|| self.path.cmp(&other.path))
            .then_with(|| self.name.cmp(&other.name))
    }
}
