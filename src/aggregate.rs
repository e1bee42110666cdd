//! Fleet-wide extraction across every registered browser.
//!
//! # Error Handling Strategy
//!
//! This is the only layer that turns adapter failures into log-and-continue:
//!
//! - **Recoverable** ([`Error::is_recoverable`]): the browser is not available on this
//!   platform, or has no bookmark store. Logged at info level and skipped.
//! - **Everything else** (a corrupt store, I/O errors): propagated. Partial output
//!   built from a garbled store would be worse than failing the run.
//!
//! Single-profile fetches are stricter: a browser without an install directory is
//! [`Error::BrowserNotInstalled`], and a named profile without the expected store is
//! a hard [`Error::ProfileNotFound`].

use tracing::info;

use crate::browsers::{Browser, BrowserKind, FetchOptions};
use crate::error::{Error, Result};
use crate::models::FetchType;
use crate::outputs::{BookmarkOutputs, HistoryOutputs, Outputs, Record};
use crate::utils::environment::HostContext;

/// Fetch history from every registered browser
///
/// Browsers are visited in registry order. The merged collection is sorted once with
/// the null-safe record ordering.
///
/// # Examples
///
/// ```no_run
/// use browser_history::{HostContext, fetch_all_history};
///
/// let ctx = HostContext::detect()?;
/// let history = fetch_all_history(&ctx)?;
/// println!("{}", history.to_csv()?);
/// # Ok::<(), browser_history::Error>(())
/// ```
pub fn fetch_all_history(ctx: &HostContext) -> Result<HistoryOutputs> {
    fetch_all(ctx, |browser| browser.fetch_history(None, FetchOptions::default()))
}

/// Fetch bookmarks from every registered browser that has a bookmark store
pub fn fetch_all_bookmarks(ctx: &HostContext) -> Result<BookmarkOutputs> {
    fetch_all(ctx, |browser| browser.fetch_bookmarks(None, FetchOptions::default()))
}

fn fetch_all<R, F>(ctx: &HostContext, fetch: F) -> Result<Outputs<R>>
where
    R: Record,
    F: Fn(&Browser) -> Result<Outputs<R>>,
{
    let mut merged = Outputs::new();

    for kind in BrowserKind::ALL {
        let result = Browser::with_context(kind, ctx).and_then(|browser| fetch(&browser));
        match result {
            Ok(outputs) => merged.append(outputs),
            Err(e) if e.is_recoverable() => info!("{}", e),
            Err(e) => return Err(e),
        }
    }

    merged.sort(false);
    Ok(merged)
}

/// Fetch history of one profile of one browser
///
/// # Errors
///
/// Returns [`Error::BrowserNotInstalled`] if the install directory is missing,
/// [`Error::ProfileNotFound`] if the profile has no history store, and propagates
/// every adapter error unchanged.
pub fn fetch_profile_history(browser: &Browser, profile: &str) -> Result<HistoryOutputs> {
    ensure_installed(browser)?;
    let path = browser.history_path(profile);
    if !path.is_file() {
        return Err(profile_not_found(browser, profile, FetchType::History));
    }
    browser.fetch_history(Some(std::slice::from_ref(&path)), FetchOptions::default())
}

/// Fetch bookmarks of one profile of one browser
///
/// # Errors
///
/// Returns [`Error::BookmarksNotSupported`] before looking at the profile, then
/// [`Error::BrowserNotInstalled`] or [`Error::ProfileNotFound`].
pub fn fetch_profile_bookmarks(browser: &Browser, profile: &str) -> Result<BookmarkOutputs> {
    let path = browser.bookmarks_path(profile)?;
    ensure_installed(browser)?;
    if !path.is_file() {
        return Err(profile_not_found(browser, profile, FetchType::Bookmarks));
    }
    browser.fetch_bookmarks(Some(std::slice::from_ref(&path)), FetchOptions::default())
}

fn ensure_installed(browser: &Browser) -> Result<()> {
    if browser.install_dir().is_dir() {
        return Ok(());
    }
    Err(Error::BrowserNotInstalled { browser: browser.name(), path: browser.install_dir().to_path_buf() })
}

fn profile_not_found(browser: &Browser, profile: &str, fetch_type: FetchType) -> Error {
    Error::ProfileNotFound { profile: profile.to_string(), browser: browser.name(), fetch_type: fetch_type.to_string() }
}
