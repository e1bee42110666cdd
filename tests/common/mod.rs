//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, params};
use tempfile::TempDir;

/// Seconds between 1601-01-01 and 1970-01-01
pub const WEBKIT_OFFSET_SECS: i64 = 11_644_473_600;
/// Seconds between 1970-01-01 and 2001-01-01
pub const MAC_OFFSET_SECS: i64 = 978_307_200;

pub const FIREFOX_LINUX_DIR: &str = ".mozilla/firefox";
pub const CHROME_LINUX_DIR: &str = ".config/google-chrome";
pub const SAFARI_MAC_DIR: &str = "Library/Safari";

pub const FIRST_HISTORY_SECS: i64 = 1_596_394_744;
pub const FIRST_HISTORY_URL: &str = "https://www.mozilla.org/en-US/privacy/firefox/";
pub const FIRST_HISTORY_TITLE: &str = "Firefox Privacy Notice — Mozilla";

pub const FIRST_BOOKMARK_SECS: i64 = 1_130_967_896;
pub const FIRST_BOOKMARK_URL: &str = "https://forums.fedoraforum.org/";
pub const FIRST_BOOKMARK_TITLE: &str = "Fedora Forum";
pub const FIRST_BOOKMARK_FOLDER: &str = "User Communities";

pub fn webkit_micros(unix_secs: i64) -> i64 {
    (unix_secs + WEBKIT_OFFSET_SECS) * 1_000_000
}

/// One visit row for a Chromium or Safari history fixture
#[derive(Debug, Clone)]
pub struct Visit {
    pub unix_secs: i64,
    pub url: String,
    pub title: Option<String>,
}

impl Visit {
    pub fn new(unix_secs: i64, url: &str, title: &str) -> Self {
        Self { unix_secs, url: url.to_string(), title: Some(title.to_string()) }
    }

    pub fn untitled(unix_secs: i64, url: &str) -> Self {
        Self { unix_secs, url: url.to_string(), title: None }
    }
}

/// Builder for a fake home directory holding browser installs
pub struct HomeDirBuilder {
    temp_dir: TempDir,
}

impl HomeDirBuilder {
    /// Create a new builder with an empty home directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Get the path to the home directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write raw bytes at a path relative to the home directory
    pub fn with_file(self, relative: &str, contents: &[u8]) -> Self {
        let path = self.temp_dir.path().join(relative);
        fs::create_dir_all(path.parent().expect("relative path has a parent")).expect("Failed to create dirs");
        fs::write(&path, contents).expect("Failed to write file");
        self
    }

    /// Add a Firefox profile with the standard 5-visit, 30-bookmark `places.sqlite`
    pub fn with_firefox_profile(self, profile: &str) -> Self {
        let dir = self.temp_dir.path().join(FIREFOX_LINUX_DIR).join(profile);
        fs::create_dir_all(&dir).expect("Failed to create Firefox profile");
        create_places_db(&dir.join("places.sqlite"));
        self
    }

    /// Add a Chrome profile with the given visits and optional `Bookmarks` JSON
    pub fn with_chrome_profile(self, profile: &str, visits: &[Visit], bookmarks: Option<&str>) -> Self {
        let dir = self.temp_dir.path().join(CHROME_LINUX_DIR).join(profile);
        fs::create_dir_all(&dir).expect("Failed to create Chrome profile");
        create_chromium_history_db(&dir.join("History"), visits);
        if let Some(json) = bookmarks {
            fs::write(dir.join("Bookmarks"), json).expect("Failed to write Bookmarks");
        }
        self
    }

    /// Add a Safari `History.db` with the given visits
    pub fn with_safari_history(self, visits: &[Visit]) -> Self {
        let dir = self.temp_dir.path().join(SAFARI_MAC_DIR);
        fs::create_dir_all(&dir).expect("Failed to create Safari dir");
        create_safari_history_db(&dir.join("History.db"), visits);
        self
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for HomeDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Firefox `places.sqlite` with 5 listed visits, 30 listed bookmarks and a few rows
/// that the extraction queries must ignore
pub fn create_places_db(path: &Path) {
    let conn = Connection::open(path).expect("Failed to create places.sqlite");
    conn.execute_batch(
        "CREATE TABLE moz_places (id INTEGER PRIMARY KEY, url LONGVARCHAR, title LONGVARCHAR,
                                  visit_count INTEGER DEFAULT 0);
         CREATE TABLE moz_historyvisits (id INTEGER PRIMARY KEY, from_visit INTEGER, place_id INTEGER,
                                         visit_date INTEGER, visit_type INTEGER);
         CREATE TABLE moz_bookmarks (id INTEGER PRIMARY KEY, type INTEGER, fk INTEGER DEFAULT NULL,
                                     parent INTEGER, position INTEGER, title LONGVARCHAR,
                                     dateAdded INTEGER, lastModified INTEGER);",
    )
    .expect("Failed to create places schema");

    let visits: [(i64, &str, Option<&str>); 8] = [
        (FIRST_HISTORY_SECS, FIRST_HISTORY_URL, Some(FIRST_HISTORY_TITLE)),
        (1_596_394_790, "https://www.mozilla.org/en-US/firefox/welcome/", Some("Welcome to Firefox")),
        (1_596_394_901, "https://www.google.com/", Some("Google")),
        (1_596_395_012, "https://www.rust-lang.org/", Some("Rust Programming Language")),
        (1_596_398_222, "https://docs.rs/", Some("Docs.rs")),
        // Filtered: no title, non-http scheme
        (1_596_399_000, "https://www.example.com/untitled", None),
        (1_596_399_100, "file:///home/user/notes.txt", Some("notes.txt")),
        (1_596_399_200, "about:config", Some("Advanced Preferences")),
    ];
    for (id, (secs, url, title)) in visits.iter().enumerate() {
        let place_id = id as i64 + 1;
        conn.execute("INSERT INTO moz_places (id, url, title) VALUES (?1, ?2, ?3)", params![place_id, url, title])
            .expect("Failed to insert place");
        conn.execute(
            "INSERT INTO moz_historyvisits (place_id, visit_date, visit_type) VALUES (?1, ?2, 1)",
            params![place_id, secs * 1_000_000],
        )
        .expect("Failed to insert visit");
    }

    // Folders: 1 root, 2 menu, 3 and 4 user folders
    let folders = [(1, 0, ""), (2, 1, "menu"), (3, 2, FIRST_BOOKMARK_FOLDER), (4, 2, "Mozilla Firefox")];
    for (id, parent, title) in folders {
        conn.execute(
            "INSERT INTO moz_bookmarks (id, type, parent, title, dateAdded) VALUES (?1, 2, ?2, ?3, 1130967000000000)",
            params![id, parent, title],
        )
        .expect("Failed to insert folder");
    }

    let mut place_id = 100;
    let mut bookmark_id = 10;
    let mut add_bookmark = |secs: i64, url: &str, title: Option<&str>, parent: i64| {
        conn.execute("INSERT INTO moz_places (id, url, title) VALUES (?1, ?2, ?3)", params![place_id, url, title])
            .expect("Failed to insert bookmarked place");
        conn.execute(
            "INSERT INTO moz_bookmarks (id, type, fk, parent, title, dateAdded) VALUES (?1, 1, ?2, ?3, ?4, ?5)",
            params![bookmark_id, place_id, parent, title, secs * 1_000_000],
        )
        .expect("Failed to insert bookmark");
        place_id += 1;
        bookmark_id += 1;
    };

    add_bookmark(FIRST_BOOKMARK_SECS, FIRST_BOOKMARK_URL, Some(FIRST_BOOKMARK_TITLE), 3);
    for i in 1..30 {
        let parent = if i % 2 == 0 { 3 } else { 4 };
        add_bookmark(
            1_200_000_000 + i * 86_400,
            &format!("https://www.example.org/page/{}", i),
            Some(format!("Example page {}", i).as_str()),
            parent,
        );
    }
    // Filtered: untitled, non-http scheme
    add_bookmark(1_300_000_000, "https://www.example.org/untitled", None, 4);
    add_bookmark(1_300_000_100, "place:sort=8&maxResults=10", Some("Most Visited"), 2);
}

pub fn create_chromium_history_db(path: &Path, visits: &[Visit]) {
    let conn = Connection::open(path).expect("Failed to create History");
    conn.execute_batch(
        "CREATE TABLE urls (id INTEGER PRIMARY KEY, url LONGVARCHAR, title LONGVARCHAR,
                            visit_count INTEGER DEFAULT 0 NOT NULL);
         CREATE TABLE visits (id INTEGER PRIMARY KEY, url INTEGER NOT NULL, visit_time INTEGER NOT NULL,
                              from_visit INTEGER, visit_duration INTEGER DEFAULT 0 NOT NULL);",
    )
    .expect("Failed to create History schema");

    for (id, visit) in visits.iter().enumerate() {
        let id = id as i64 + 1;
        conn.execute("INSERT INTO urls (id, url, title) VALUES (?1, ?2, ?3)", params![id, visit.url, visit.title])
            .expect("Failed to insert url");
        conn.execute(
            "INSERT INTO visits (url, visit_time, visit_duration) VALUES (?1, ?2, 1500000)",
            params![id, webkit_micros(visit.unix_secs)],
        )
        .expect("Failed to insert visit");
    }
}

pub fn create_safari_history_db(path: &Path, visits: &[Visit]) {
    let conn = Connection::open(path).expect("Failed to create History.db");
    conn.execute_batch(
        "CREATE TABLE history_items (id INTEGER PRIMARY KEY, url TEXT NOT NULL UNIQUE, visit_count INTEGER);
         CREATE TABLE history_visits (id INTEGER PRIMARY KEY, history_item INTEGER NOT NULL,
                                      visit_time REAL NOT NULL, title TEXT);",
    )
    .expect("Failed to create Safari schema");

    for (id, visit) in visits.iter().enumerate() {
        let id = id as i64 + 1;
        conn.execute("INSERT INTO history_items (id, url) VALUES (?1, ?2)", params![id, visit.url])
            .expect("Failed to insert history item");
        conn.execute(
            "INSERT INTO history_visits (history_item, visit_time, title) VALUES (?1, ?2, ?3)",
            params![id, (visit.unix_secs - MAC_OFFSET_SECS) as f64, visit.title],
        )
        .expect("Failed to insert history visit");
    }
}

/// A Chromium `Bookmarks` document with one nested folder
pub fn chromium_bookmarks_json() -> String {
    format!(
        r#"{{
    "checksum": "0e1b6fc9c5a7d3d1f6b4c1c2b2b9a0a1",
    "roots": {{
        "bookmark_bar": {{
            "children": [
                {{"date_added": "{}", "id": "5", "name": "Rust", "type": "url", "url": "https://www.rust-lang.org/"}},
                {{"children": [
                    {{"date_added": "{}", "id": "7", "name": "crates.io", "type": "url", "url": "https://crates.io/"}}
                 ], "date_added": "{}", "id": "6", "name": "Dev", "type": "folder"}}
            ],
            "date_added": "{}", "id": "1", "name": "Bookmarks bar", "type": "folder"
        }},
        "other": {{"children": [], "date_added": "{}", "id": "2", "name": "Other bookmarks", "type": "folder"}},
        "synced": {{"children": [], "date_added": "{}", "id": "3", "name": "Mobile bookmarks", "type": "folder"}}
    }},
    "version": 1
}}"#,
        webkit_micros(1_600_000_000),
        webkit_micros(1_600_000_100),
        webkit_micros(1_599_999_000),
        webkit_micros(1_599_000_000),
        webkit_micros(1_599_000_000),
        webkit_micros(1_599_000_000),
    )
}

/// Standard Chrome visits used across tests
pub fn chrome_visits() -> Vec<Visit> {
    vec![
        Visit::new(1_612_843_652, "https://github.com/", "GitHub"),
        Visit::new(1_612_843_700, "https://news.ycombinator.com/", "Hacker News"),
        Visit::untitled(1_612_843_800, "https://example.net/raw"),
    ]
}

pub fn firefox_places(home: &Path, profile: &str) -> PathBuf {
    home.join(FIREFOX_LINUX_DIR).join(profile).join("places.sqlite")
}
