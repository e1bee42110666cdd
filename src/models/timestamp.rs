//! Epoch conversions for the timestamp encodings browsers store on disk.
//!
//! Every conversion truncates to whole seconds and tags the result with the local
//! time zone.

use chrono::{DateTime, Local, TimeZone};
use serde::Serializer;

/// Seconds between 1601-01-01 (Chromium/WebKit epoch) and the Unix epoch
pub const WEBKIT_EPOCH_OFFSET_SECS: i64 = 11_644_473_600;

/// Seconds between the Unix epoch and 2001-01-01 (Core Data epoch used by Safari)
pub const MAC_EPOCH_OFFSET_SECS: i64 = 978_307_200;

const MICROS_PER_SEC: i64 = 1_000_000;

/// Converts Unix seconds to local time. `None` when out of chrono's range.
pub fn from_unix_seconds(secs: i64) -> Option<DateTime<Local>> {
    Local.timestamp_opt(secs, 0).single()
}

/// Converts Chromium's microseconds-since-1601 to local time, dropping sub-second precision
pub fn from_webkit_micros(micros: i64) -> Option<DateTime<Local>> {
    from_unix_seconds(micros / MICROS_PER_SEC - WEBKIT_EPOCH_OFFSET_SECS)
}

/// Converts Firefox's microseconds-since-1970 to local time
pub fn from_unix_micros(micros: i64) -> Option<DateTime<Local>> {
    from_unix_seconds(micros / MICROS_PER_SEC)
}

/// Serialized timestamp form: ISO-8601 with a numeric offset, never `Z`
pub const ISO_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Converts Safari's seconds-since-2001 to local time
pub fn from_mac_seconds(secs: f64) -> Option<DateTime<Local>> {
    from_unix_seconds(secs.trunc() as i64 + MAC_EPOCH_OFFSET_SECS)
}

/// `serialize_with` helper rendering [`ISO_TIMESTAMP_FORMAT`]
pub fn serialize_iso<S: Serializer>(ts: &DateTime<Local>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&ts.format(ISO_TIMESTAMP_FORMAT))
}

/// [`serialize_iso`] for optional timestamps; `None` stays null
pub fn serialize_iso_opt<S: Serializer>(ts: &Option<DateTime<Local>>, serializer: S) -> Result<S::Ok, S::Error> {
    match ts {
        Some(ts) => serialize_iso(ts, serializer),
        None => serializer.serialize_none(),
    }
}
