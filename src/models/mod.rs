//! Record types produced by browser extraction.
//!
//! - [`HistoryRecord`] - a visited page (timestamp, URL, optional title)
//! - [`BookmarkRecord`] - a bookmark with its folder breadcrumb
//! - [`CookieRecord`] - a decrypted Chromium cookie
//! - [`FetchType`] - which record kind a CLI run extracts
//!
//! All timestamps are normalized to the local time zone by the helpers in
//! [`timestamp`].

pub mod bookmark;
pub mod cookie;
pub mod fetch_type;
pub mod history;
pub mod timestamp;

pub use bookmark::BookmarkRecord;
pub use cookie::CookieRecord;
pub use fetch_type::FetchType;
pub use history::HistoryRecord;
