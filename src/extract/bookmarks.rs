//! Bookmark parsers for the two on-disk layouts.
//!
//! Chromium keeps bookmarks in a JSON document whose `roots` hold named trees
//! (`bookmark_bar`, `other`, `synced`). Each tree is walked depth-first and the
//! folder breadcrumb grows as the walk descends: a URL inside
//! `bookmark_bar > github` is reported with folder `bookmark_bar/github`.
//!
//! Firefox keeps bookmarks in `places.sqlite`; the parent folder title is
//! resolved by joining `moz_bookmarks` against itself.

use std::path::{MAIN_SEPARATOR_STR, Path};

use rusqlite::Connection;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::BookmarkRecord;
use crate::models::timestamp::{from_unix_micros, from_webkit_micros};

const FIREFOX_BOOKMARKS_SQL: &str = "
    SELECT moz_bookmarks.dateAdded, moz_places.url, moz_bookmarks.title, moz_folder.title
    FROM moz_bookmarks JOIN moz_places, moz_bookmarks AS moz_folder
    ON moz_bookmarks.fk = moz_places.id AND moz_bookmarks.parent = moz_folder.id
    WHERE moz_bookmarks.dateAdded IS NOT NULL
      AND moz_places.url LIKE 'http%'
      AND moz_bookmarks.title IS NOT NULL";

#[derive(Debug, Deserialize)]
struct BookmarkFile {
    #[serde(default)]
    roots: serde_json::Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum BookmarkNode {
    Url {
        date_added: String,
        url: String,
        #[serde(default)]
        name: String,
    },
    Folder {
        #[serde(default)]
        name: String,
        #[serde(default)]
        children: Vec<BookmarkNode>,
    },
    #[serde(other)]
    Other,
}

/// Parse a Chromium `Bookmarks` JSON document
///
/// # Errors
///
/// Returns [`Error::CorruptStore`] naming `source` if the document is not valid JSON,
/// a node is malformed, or a `date_added` is not an integer.
pub fn parse_chromium_bookmarks(json: &str, source: &Path) -> Result<Vec<BookmarkRecord>> {
    let file: BookmarkFile = serde_json::from_str(json).map_err(|e| Error::corrupt(source, e))?;

    let mut records = Vec::new();
    for (root_name, root) in &file.roots {
        // Older files carry non-tree entries such as `sync_transaction_version`
        let Some(children) = root.as_object().and_then(|obj| obj.get("children")) else {
            continue;
        };
        let children = Vec::<BookmarkNode>::deserialize(children).map_err(|e| Error::corrupt(source, e))?;
        walk(&children, root_name, source, &mut records)?;
    }
    Ok(records)
}

fn walk(nodes: &[BookmarkNode], folder: &str, source: &Path, out: &mut Vec<BookmarkRecord>) -> Result<()> {
    for node in nodes {
        match node {
            BookmarkNode::Url { date_added, url, name } => {
                let micros: i64 = date_added
                    .parse()
                    .map_err(|_| Error::corrupt(source, format!("invalid date_added {:?}", date_added)))?;
                let Some(timestamp) = from_webkit_micros(micros) else {
                    continue;
                };
                out.push(BookmarkRecord::new(timestamp, url.as_str(), name.as_str(), folder));
            }
            BookmarkNode::Folder { name, children } => {
                let nested = format!("{}{}{}", folder, MAIN_SEPARATOR_STR, name);
                walk(children, &nested, source, out)?;
            }
            BookmarkNode::Other => {}
        }
    }
    Ok(())
}

/// Read bookmarks from an opened Firefox `places.sqlite` snapshot
pub fn read_firefox_bookmarks(conn: &Connection, source: &Path) -> Result<Vec<BookmarkRecord>> {
    let mut stmt = conn.prepare(FIREFOX_BOOKMARKS_SQL).map_err(|e| Error::corrupt(source, e))?;
    let rows = stmt
        .query_map([], |row| {
            let added: i64 = row.get(0)?;
            let url: String = row.get(1)?;
            let title: String = row.get(2)?;
            let folder: Option<String> = row.get(3)?;
            Ok((added, url, title, folder))
        })
        .map_err(|e| Error::corrupt(source, e))?;

    let mut records = Vec::new();
    for row in rows {
        let (added, url, title, folder) = row.map_err(|e| Error::corrupt(source, e))?;
        if let Some(timestamp) = from_unix_micros(added) {
            records.push(BookmarkRecord::new(timestamp, url, title, folder.unwrap_or_default()));
        }
    }
    Ok(records)
}
