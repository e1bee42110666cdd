//! Static adapter registry.
//!
//! Each supported browser is a [`BrowserKind`] whose behaviour is carried entirely
//! by a constant [`BrowserConfig`]. Browser families share a base record and
//! override only the fields that differ.

use std::fmt;

use crate::error::{Error, Result};
use crate::utils::platform::Platform;

/// How the first column of a history query encodes its timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampEncoding {
    /// Microseconds since 1601-01-01 (Chromium)
    WebkitMicros,
    /// Microseconds since 1970-01-01 (Firefox)
    UnixMicros,
    /// Seconds since 2001-01-01, possibly fractional (Safari)
    MacSeconds,
}

/// A history query returning `(timestamp, url, title)` rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryQuery {
    pub sql: &'static str,
    pub timestamps: TimestampEncoding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookmarkParser {
    /// JSON document with `roots` of nested `url`/`folder` nodes
    ChromiumJson,
    /// `moz_bookmarks` self-join in `places.sqlite`
    FirefoxSql,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookmarkSource {
    pub file: &'static str,
    pub parser: BookmarkParser,
}

/// Where a Chromium-family browser keeps its cookies and its encryption secret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookieSource {
    /// Candidate store locations relative to a profile, newest layout first
    pub files: &'static [&'static str],
    /// `application` attribute of the Secret Service item (Linux)
    pub keyring_application: &'static str,
    /// Keychain generic-password service and account (macOS)
    pub keychain_service: &'static str,
    pub keychain_account: &'static str,
}

/// Per-browser configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserConfig {
    pub name: &'static str,
    /// Lowercase identifiers used to recognise the OS default browser
    pub aliases: &'static [&'static str],
    pub linux_path: Option<&'static str>,
    pub windows_path: Option<&'static str>,
    pub mac_path: Option<&'static str>,
    pub profile_support: bool,
    /// Accepted leading names of profile directories; empty accepts any
    pub profile_prefixes: &'static [&'static str],
    pub history_file: &'static str,
    pub history_query: HistoryQuery,
    pub bookmarks: Option<BookmarkSource>,
    pub cookies: Option<CookieSource>,
}

impl BrowserConfig {
    /// Relative install path for `platform`, if the browser exists there
    pub fn path_for(&self, platform: Platform) -> Option<&'static str> {
        match platform {
            Platform::Linux => self.linux_path,
            Platform::Windows => self.windows_path,
            Platform::Mac => self.mac_path,
            Platform::Other => None,
        }
    }
}

const CHROMIUM_HISTORY: HistoryQuery = HistoryQuery {
    sql: "SELECT visits.visit_time, urls.url, urls.title
          FROM visits INNER JOIN urls ON visits.url = urls.id
          WHERE visits.visit_duration > 0
          ORDER BY visits.visit_time DESC",
    timestamps: TimestampEncoding::WebkitMicros,
};

const FIREFOX_HISTORY: HistoryQuery = HistoryQuery {
    sql: "SELECT moz_historyvisits.visit_date, moz_places.url, moz_places.title
          FROM moz_historyvisits INNER JOIN moz_places ON moz_historyvisits.place_id = moz_places.id
          WHERE moz_historyvisits.visit_date IS NOT NULL
            AND moz_places.url LIKE 'http%'
            AND moz_places.title IS NOT NULL",
    timestamps: TimestampEncoding::UnixMicros,
};

const SAFARI_HISTORY: HistoryQuery = HistoryQuery {
    sql: "SELECT history_visits.visit_time, history_items.url, history_visits.title
          FROM history_visits INNER JOIN history_items ON history_items.id = history_visits.history_item
          ORDER BY history_visits.visit_time DESC",
    timestamps: TimestampEncoding::MacSeconds,
};

const CHROMIUM_COOKIE_FILES: &[&str] = &["Network/Cookies", "Cookies"];

const CHROMIUM_FAMILY: BrowserConfig = BrowserConfig {
    name: "Chromium",
    aliases: &["chromiumhtm", "chromium-browser", "chromiumhtml"],
    linux_path: Some(".config/chromium"),
    windows_path: Some("AppData/Local/chromium/User Data"),
    mac_path: None,
    profile_support: true,
    profile_prefixes: &["Default", "Profile"],
    history_file: "History",
    history_query: CHROMIUM_HISTORY,
    bookmarks: Some(BookmarkSource { file: "Bookmarks", parser: BookmarkParser::ChromiumJson }),
    cookies: Some(CookieSource {
        files: CHROMIUM_COOKIE_FILES,
        keyring_application: "chromium",
        keychain_service: "Chromium Safe Storage",
        keychain_account: "Chromium",
    }),
};

const FIREFOX_FAMILY: BrowserConfig = BrowserConfig {
    name: "Firefox",
    aliases: &["firefoxurl"],
    linux_path: Some(".mozilla/firefox"),
    windows_path: Some("AppData/Roaming/Mozilla/Firefox/Profiles"),
    mac_path: Some("Library/Application Support/Firefox/Profiles/"),
    profile_support: true,
    profile_prefixes: &[],
    history_file: "places.sqlite",
    history_query: FIREFOX_HISTORY,
    bookmarks: Some(BookmarkSource { file: "places.sqlite", parser: BookmarkParser::FirefoxSql }),
    cookies: None,
};

const CHROMIUM: BrowserConfig = CHROMIUM_FAMILY;

const CHROME: BrowserConfig = BrowserConfig {
    name: "Chrome",
    aliases: &["chromehtml", "google-chrome", "chromehtm"],
    linux_path: Some(".config/google-chrome"),
    windows_path: Some("AppData/Local/Google/Chrome/User Data"),
    mac_path: Some("Library/Application Support/Google/Chrome/"),
    cookies: Some(CookieSource {
        files: CHROMIUM_COOKIE_FILES,
        keyring_application: "chrome",
        keychain_service: "Chrome Safe Storage",
        keychain_account: "Chrome",
    }),
    ..CHROMIUM_FAMILY
};

const FIREFOX: BrowserConfig = FIREFOX_FAMILY;

const LIBREWOLF: BrowserConfig = BrowserConfig {
    name: "LibreWolf",
    aliases: &["librewolfurl"],
    linux_path: Some(".librewolf"),
    windows_path: None,
    mac_path: None,
    ..FIREFOX_FAMILY
};

const SAFARI: BrowserConfig = BrowserConfig {
    name: "Safari",
    aliases: &[],
    linux_path: None,
    windows_path: None,
    mac_path: Some("Library/Safari"),
    profile_support: false,
    profile_prefixes: &[],
    history_file: "History.db",
    history_query: SAFARI_HISTORY,
    bookmarks: None,
    cookies: None,
};

const EDGE: BrowserConfig = BrowserConfig {
    name: "Edge",
    aliases: &["msedgehtm", "msedge", "microsoft-edge", "microsoft-edge-dev"],
    linux_path: Some(".config/microsoft-edge-dev"),
    windows_path: Some("AppData/Local/Microsoft/Edge/User Data"),
    mac_path: Some("Library/Application Support/Microsoft Edge"),
    cookies: Some(CookieSource {
        files: CHROMIUM_COOKIE_FILES,
        keyring_application: "chromium",
        keychain_service: "Microsoft Edge Safe Storage",
        keychain_account: "Microsoft Edge",
    }),
    ..CHROMIUM_FAMILY
};

const OPERA: BrowserConfig = BrowserConfig {
    name: "Opera",
    aliases: &["operastable", "opera-stable"],
    linux_path: Some(".config/opera"),
    windows_path: Some("AppData/Roaming/Opera Software/Opera Stable"),
    mac_path: Some("Library/Application Support/com.operasoftware.Opera"),
    profile_support: false,
    cookies: Some(CookieSource {
        files: CHROMIUM_COOKIE_FILES,
        keyring_application: "chromium",
        keychain_service: "Opera Safe Storage",
        keychain_account: "Opera",
    }),
    ..CHROMIUM_FAMILY
};

const OPERA_GX: BrowserConfig = BrowserConfig {
    name: "OperaGX",
    aliases: &["operagxstable", "operagx-stable"],
    linux_path: None,
    windows_path: Some("AppData/Roaming/Opera Software/Opera GX Stable"),
    mac_path: None,
    ..OPERA
};

const BRAVE: BrowserConfig = BrowserConfig {
    name: "Brave",
    aliases: &["bravehtml"],
    linux_path: Some(".config/BraveSoftware/Brave-Browser"),
    windows_path: Some("AppData/Local/BraveSoftware/Brave-Browser/User Data"),
    mac_path: Some("Library/Application Support/BraveSoftware/Brave-Browser"),
    cookies: Some(CookieSource {
        files: CHROMIUM_COOKIE_FILES,
        keyring_application: "brave",
        keychain_service: "Brave Safe Storage",
        keychain_account: "Brave",
    }),
    ..CHROMIUM_FAMILY
};

const VIVALDI: BrowserConfig = BrowserConfig {
    name: "Vivaldi",
    aliases: &["vivaldi-stable", "vivaldistable"],
    linux_path: Some(".config/vivaldi"),
    windows_path: Some("AppData/Local/Vivaldi/User Data"),
    mac_path: Some("Library/Application Support/Vivaldi"),
    ..CHROMIUM_FAMILY
};

/// Every supported browser, in registry order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrowserKind {
    Chromium,
    Chrome,
    Firefox,
    LibreWolf,
    Safari,
    Edge,
    Opera,
    OperaGx,
    Brave,
    Vivaldi,
}

impl BrowserKind {
    /// Registry order; fleet-wide fetches visit adapters in this order
    pub const ALL: [BrowserKind; 10] = [
        BrowserKind::Chromium,
        BrowserKind::Chrome,
        BrowserKind::Firefox,
        BrowserKind::LibreWolf,
        BrowserKind::Safari,
        BrowserKind::Edge,
        BrowserKind::Opera,
        BrowserKind::OperaGx,
        BrowserKind::Brave,
        BrowserKind::Vivaldi,
    ];

    pub fn config(self) -> &'static BrowserConfig {
        match self {
            BrowserKind::Chromium => &CHROMIUM,
            BrowserKind::Chrome => &CHROME,
            BrowserKind::Firefox => &FIREFOX,
            BrowserKind::LibreWolf => &LIBREWOLF,
            BrowserKind::Safari => &SAFARI,
            BrowserKind::Edge => &EDGE,
            BrowserKind::Opera => &OPERA,
            BrowserKind::OperaGx => &OPERA_GX,
            BrowserKind::Brave => &BRAVE,
            BrowserKind::Vivaldi => &VIVALDI,
        }
    }

    pub fn name(self) -> &'static str {
        self.config().name
    }

    /// Looks a browser up by display name, ignoring case
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownBrowser`] when no adapter has that name.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownBrowser(name.to_string()))
    }

    /// Whether the browser declares an install path for `platform`
    ///
    /// Says nothing about whether it is actually installed.
    pub fn is_supported(self, platform: Platform) -> bool {
        self.config().path_for(platform).is_some()
    }
}

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
