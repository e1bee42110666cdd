//! Error taxonomy for browser data extraction.
//!
//! Adapter-level failures that the aggregation layer may log and skip are reported
//! by [`Error::is_recoverable`]. Everything else is meant to terminate the run.

use std::path::PathBuf;

use thiserror::Error;

use crate::utils::platform::Platform;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{browser} browser is not supported on {platform}")]
    PlatformUnsupported { browser: &'static str, platform: Platform },

    #[error("{browser} browser is not installed (looked in {})", path.display())]
    BrowserNotInstalled { browser: &'static str, path: PathBuf },

    #[error("Bookmarks are not supported for {browser} browser")]
    BookmarksNotSupported { browser: &'static str },

    #[error("Cookies are not supported for {browser} browser")]
    CookiesNotSupported { browser: &'static str },

    #[error("{browser} browser does not support profiles")]
    ProfilesNotSupported { browser: &'static str },

    #[error("Profile '{profile}' not found in {browser} browser or profile does not contain {fetch_type}")]
    ProfileNotFound { profile: String, browser: &'static str, fetch_type: String },

    #[error("Invalid format {name}. Should be one of {}", valid.join(", "))]
    InvalidFormat { name: String, valid: &'static [&'static str] },

    #[error("Type {0} is unavailable. Check --help for available types")]
    InvalidFetchType(String),

    #[error("{0} browser is unavailable. Check --help for available browsers")]
    UnknownBrowser(String),

    #[error("Could not determine the default browser: {0}")]
    DefaultBrowserUnavailable(String),

    #[error("Cookie decryption on {platform} requires the following packages: {}", packages.join(", "))]
    MissingDecryptionDependency { platform: Platform, packages: &'static [&'static str] },

    #[error("Keyring unavailable: {0}")]
    KeyringUnavailable(String),

    #[error("Failed to decrypt cookie value: {0}")]
    Decryption(String),

    #[error("Could not read {}: {reason}", path.display())]
    CorruptStore { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Whether fleet-wide aggregation may log this failure and move on
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::PlatformUnsupported { .. }
                | Error::BrowserNotInstalled { .. }
                | Error::BookmarksNotSupported { .. }
                | Error::CookiesNotSupported { .. }
        )
    }

    /// Wraps a query or parse failure against a copied store, naming the source file.
    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::CorruptStore { path: path.into(), reason: reason.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_cli_wording() {
        let err = Error::PlatformUnsupported { browser: "Safari", platform: Platform::Linux };
        assert_eq!(err.to_string(), "Safari browser is not supported on Linux");

        let err = Error::InvalidFormat { name: "xyz".to_string(), valid: &["csv", "json", "jsonl"] };
        assert_eq!(err.to_string(), "Invalid format xyz. Should be one of csv, json, jsonl");

        let err = Error::ProfileNotFound {
            profile: "Profile 9".to_string(),
            browser: "Chrome",
            fetch_type: "history".to_string(),
        };
        assert_eq!(err.to_string(), "Profile 'Profile 9' not found in Chrome browser or profile does not contain history");
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(Error::BookmarksNotSupported { browser: "Safari" }.is_recoverable());
        assert!(Error::PlatformUnsupported { browser: "Safari", platform: Platform::Windows }.is_recoverable());
        assert!(!Error::corrupt("/tmp/History", "no such table: urls").is_recoverable());
        assert!(!Error::UnknownBrowser("netscape".to_string()).is_recoverable());
    }
}
