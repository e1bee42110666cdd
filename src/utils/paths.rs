use std::borrow::Cow;
use std::env;
use std::path::{Component, Path};

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Sentinel profile name for "data lives directly under the install directory"
pub const ROOT_PROFILE: &str = ".";

// Characters that would change the meaning of an SQLite `file:` URI
const URI_ENCODE_SET: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'#').add(b'%').add(b'?');

/// Builds a read-only, lock-free SQLite URI for a file snapshot
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use browser_history::utils::paths::snapshot_uri;
///
/// let uri = snapshot_uri(Path::new("/tmp/scratch dir/History"));
/// assert_eq!(uri, "file:/tmp/scratch%20dir/History?mode=ro&immutable=1&nolock=1");
/// ```
pub fn snapshot_uri(path: &Path) -> String {
    let path_str = path.to_string_lossy().replace('\\', "/");
    let encoded = utf8_percent_encode(&path_str, URI_ENCODE_SET);
    format!("file:{}?mode=ro&immutable=1&nolock=1", encoded)
}

/// Returns `dir` relative to `root` as a profile name
///
/// The result is normalized: `/`-joined components, no leading or trailing
/// separator. A directory equal to `root` maps to [`ROOT_PROFILE`]. Returns `None`
/// when `dir` is not under `root`.
pub fn relative_profile_name(root: &Path, dir: &Path) -> Option<String> {
    let relative = dir.strip_prefix(root).ok()?;
    let parts: Vec<Cow<'_, str>> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();

    if parts.is_empty() { Some(ROOT_PROFILE.to_string()) } else { Some(parts.join("/")) }
}

/// Formats a path with ~ substitution for the home directory
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, None)
}

/// Internal helper for path formatting with optional home override (for testing)
pub(crate) fn format_path_with_tilde_internal(path: &Path, home_override: Option<&str>) -> String {
    let home_from_env = env::var("HOME").ok();
    let home = home_override.or(home_from_env.as_deref());

    let path_str = path.to_string_lossy();
    if let Some(home) = home
        && !home.is_empty()
        && path_str.starts_with(home)
    {
        return path_str.replacen(home, "~", 1);
    }

    match path_str {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}
