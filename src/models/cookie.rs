use chrono::{DateTime, Local};
use serde::Serialize;

use super::timestamp::serialize_iso_opt;

/// A decrypted cookie from a Chromium-family cookie store
///
/// Session cookies carry no expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CookieRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Host")]
    pub host: String,
    #[serde(rename = "Path")]
    pub path: String,
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "Expires", serialize_with = "serialize_iso_opt")]
    pub expires: Option<DateTime<Local>>,
    #[serde(rename = "Secure")]
    pub secure: bool,
    #[serde(rename = "HttpOnly")]
    pub http_only: bool,
}
