use std::path::Path;

use chrono::{DateTime, Local};
use rusqlite::{Connection, Row};
use tracing::debug;

use crate::browsers::registry::{HistoryQuery, TimestampEncoding};
use crate::error::{Error, Result};
use crate::models::HistoryRecord;
use crate::models::timestamp::{from_mac_seconds, from_unix_micros, from_webkit_micros};

/// Run a history query against an opened snapshot
///
/// `source` is the original store path, used only to name the file in errors. Rows
/// whose timestamp cannot be represented are dropped.
pub fn read_history(conn: &Connection, source: &Path, query: &HistoryQuery) -> Result<Vec<HistoryRecord>> {
    let mut stmt = conn.prepare(query.sql).map_err(|e| Error::corrupt(source, e))?;
    let rows = stmt
        .query_map([], |row| {
            let timestamp = decode_timestamp(row, query.timestamps)?;
            let url: String = row.get(1)?;
            let title: Option<String> = row.get(2)?;
            Ok((timestamp, url, title))
        })
        .map_err(|e| Error::corrupt(source, e))?;

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for row in rows {
        let (timestamp, url, title) = row.map_err(|e| Error::corrupt(source, e))?;
        match timestamp {
            Some(timestamp) => records.push(HistoryRecord::new(timestamp, url, title)),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!("dropped {} rows with out-of-range timestamps from {}", dropped, source.display());
    }
    Ok(records)
}

fn decode_timestamp(row: &Row<'_>, encoding: TimestampEncoding) -> rusqlite::Result<Option<DateTime<Local>>> {
    Ok(match encoding {
        TimestampEncoding::WebkitMicros => from_webkit_micros(row.get(0)?),
        TimestampEncoding::UnixMicros => from_unix_micros(row.get(0)?),
        TimestampEncoding::MacSeconds => from_mac_seconds(row.get(0)?),
    })
}
