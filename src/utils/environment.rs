use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::utils::platform::Platform;

/// Host facts every adapter path is resolved against
///
/// Built once per invocation by [`HostContext::detect`]. Tests construct it directly
/// to bind adapters to an arbitrary platform and home directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostContext {
    pub platform: Platform,
    pub home: PathBuf,
}

impl HostContext {
    pub fn new(platform: Platform, home: impl Into<PathBuf>) -> Self {
        Self { platform, home: home.into() }
    }

    /// Detect the running platform and the user's home directory
    pub fn detect() -> Result<Self> {
        Ok(Self { platform: Platform::current(), home: get_home_dir()? })
    }
}

/// Get the user's home directory
///
/// Honours `HOME` on Unix (through `dirs`), which is how tests point the tool at a
/// fixture home.
pub fn get_home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "could not determine the home directory",
        ))
    })
}
