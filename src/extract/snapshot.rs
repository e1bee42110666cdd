use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};
use tempfile::TempDir;
use tracing::debug;

use crate::error::{Error, Result};
use crate::utils::paths::snapshot_uri;

/// Call-scoped scratch directory holding copies of browser store files
///
/// Browsers keep their databases open and locked while running, so every store is
/// copied here first and only the copy is opened. The directory and all copies are
/// removed when the value is dropped, on success and error paths alike.
pub struct ScratchDir {
    dir: TempDir,
    copies: usize,
}

impl ScratchDir {
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("browser-history-").tempdir()?;
        Ok(Self { dir, copies: 0 })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Copy `source` into the scratch directory
    ///
    /// Returns `Ok(None)` for a missing or zero-length file; neither is an error.
    pub fn copy_store(&mut self, source: &Path) -> Result<Option<PathBuf>> {
        let len = match fs::metadata(source) {
            Ok(meta) if meta.is_file() => meta.len(),
            Ok(_) => return Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if len == 0 {
            debug!("skipping empty store {}", source.display());
            return Ok(None);
        }

        let name = source.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        let target = self.dir.path().join(format!("{}-{}", self.copies, name));
        self.copies += 1;

        fs::copy(source, &target)?;
        debug!("copied {} to {}", source.display(), target.display());
        Ok(Some(target))
    }

    /// Copy `source` and open the copy as a read-only SQLite snapshot
    ///
    /// Returns `Ok(None)` when there is nothing to read (see [`ScratchDir::copy_store`]).
    pub fn open_sqlite(&mut self, source: &Path) -> Result<Option<Connection>> {
        match self.copy_store(source)? {
            Some(copy) => open_read_only(&copy).map(Some).map_err(|e| Error::corrupt(source, e)),
            None => Ok(None),
        }
    }
}

/// Open an SQLite file read-only, immutable, and without file locks
pub fn open_read_only(path: &Path) -> rusqlite::Result<Connection> {
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    Connection::open_with_flags(snapshot_uri(path), flags)
}
