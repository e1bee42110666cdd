//! Browser History - Extract history and bookmarks from locally installed web browsers
//!
//! This library reads the on-disk stores of Chromium-family browsers, Firefox-family
//! browsers and Safari without touching the originals. It supports:
//!
//! - A static registry of browser adapters with per-platform install paths
//! - Profile discovery under each install directory
//! - History and bookmark extraction from snapshot copies of the stores
//! - Chromium cookie extraction with value decryption (`cookies` feature)
//! - CSV, JSON and JSONL encoding of the extracted records
//!
//! # Example
//!
//! ```no_run
//! use browser_history::{Browser, BrowserKind, FetchOptions, OutputFormat};
//!
//! let firefox = Browser::new(BrowserKind::Firefox)?;
//! let history = firefox.fetch_history(None, FetchOptions::default())?;
//! println!("{}", history.formatted(OutputFormat::Jsonl)?);
//! # Ok::<(), browser_history::Error>(())
//! ```

pub mod aggregate;
pub mod browsers;
pub mod cli;
pub mod crypto;
pub mod error;
pub mod extract;
pub mod logging;
pub mod models;
pub mod outputs;
pub mod utils;

// Re-export commonly used types
pub use aggregate::{fetch_all_bookmarks, fetch_all_history, fetch_profile_bookmarks, fetch_profile_history};
pub use browsers::{Browser, BrowserKind, FetchOptions, default_browser};
pub use error::{Error, Result};
pub use models::{BookmarkRecord, CookieRecord, FetchType, HistoryRecord};
pub use outputs::{BookmarkOutputs, CookieOutputs, DomainGroup, HistoryOutputs, OutputFormat, Outputs, Record};
pub use utils::{HostContext, Platform};
