use std::fmt;

/// Operating systems the browser adapters know paths for.
///
/// `Other` is reserved for hosts none of the adapters support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Linux,
    Mac,
    Windows,
    Other,
}

impl Platform {
    /// Infer the platform of the running host.
    pub fn current() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` style name to a platform.
    pub fn from_os_name(os: &str) -> Self {
        match os {
            "linux" => Platform::Linux,
            "macos" => Platform::Mac,
            "windows" => Platform::Windows,
            _ => Platform::Other,
        }
    }

    /// Human readable platform name used in log and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Platform::Linux => "Linux",
            Platform::Mac => "MacOS",
            Platform::Windows => "Windows",
            Platform::Other => "Unknown",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
