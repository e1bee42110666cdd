//! Extraction engine: copy a store to scratch space, open the copy read-only, and map
//! its contents into records.

pub mod bookmarks;
#[cfg(feature = "cookies")]
pub mod cookies;
pub mod history;
pub mod snapshot;

pub use bookmarks::{parse_chromium_bookmarks, read_firefox_bookmarks};
#[cfg(feature = "cookies")]
pub use cookies::read_cookies;
pub use history::read_history;
pub use snapshot::{ScratchDir, open_read_only};
