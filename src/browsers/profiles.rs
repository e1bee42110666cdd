use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::utils::paths::{ROOT_PROFILE, relative_profile_name};

/// Find every profile directory under `install_dir` that directly contains `store_file`
///
/// Walks the install directory (without following symlinks) and reports each directory
/// holding a file named `store_file`, relative to `install_dir` with `/` separators. A
/// store directly in `install_dir` is reported as `"."`.
///
/// # Arguments
///
/// * `install_dir` - The browser's resolved install directory
/// * `prefixes` - Accepted leading names of the first path component; empty accepts any
/// * `store_file` - File name identifying a profile (`History`, `places.sqlite`, ...)
///
/// # Returns
///
/// Profile names in file-name order. Returns an empty Vec if `install_dir` doesn't
/// exist (not an error). Unreadable subdirectories are logged and skipped.
pub fn discover_profiles(install_dir: &Path, prefixes: &[&str], store_file: &str) -> Vec<String> {
    if !install_dir.is_dir() {
        return Vec::new();
    }

    let mut profiles = Vec::new();

    let walker = WalkDir::new(install_dir).sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("skipping unreadable entry under {}: {}", install_dir.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_file() || entry.file_name() != store_file {
            continue;
        }

        let Some(dir) = entry.path().parent() else {
            continue;
        };
        let Some(profile) = relative_profile_name(install_dir, dir) else {
            continue;
        };

        if matches_prefix(&profile, prefixes) {
            profiles.push(profile);
        }
    }

    profiles
}

// The root sentinel always passes; otherwise the first component must carry a prefix
fn matches_prefix(profile: &str, prefixes: &[&str]) -> bool {
    if prefixes.is_empty() || profile == ROOT_PROFILE {
        return true;
    }
    let top = profile.split('/').next().unwrap_or(profile);
    prefixes.iter().any(|prefix| top.starts_with(prefix))
}
