use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Serialization formats an [`Outputs`](super::Outputs) collection can be rendered to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
    Jsonl,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Csv, OutputFormat::Json, OutputFormat::Jsonl];

    /// Registered format names, in the order they are listed to users
    pub const NAMES: &'static [&'static str] = &["csv", "json", "jsonl"];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Infers the format from a file extension
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] when the path has no extension or the extension
    /// is not a registered format name.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension().map(|e| e.to_string_lossy()).unwrap_or_default();
        ext.parse()
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" => Ok(OutputFormat::Jsonl),
            _ => Err(Error::InvalidFormat { name: s.to_string(), valid: Self::NAMES }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(OutputFormat::from_path(Path::new("out/history.json")).unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_path(Path::new("history.JSONL")).unwrap(), OutputFormat::Jsonl);
        assert_eq!(OutputFormat::from_path(Path::new("history.csv")).unwrap(), OutputFormat::Csv);
    }

    #[test]
    fn test_from_path_unknown_extension() {
        let err = OutputFormat::from_path(Path::new("history.xyz")).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat { ref name, .. } if name == "xyz"));

        assert!(OutputFormat::from_path(Path::new("history")).is_err());
    }

    #[test]
    fn test_names_match_variants() {
        let names: Vec<&str> = OutputFormat::ALL.iter().map(|f| f.as_str()).collect();
        assert_eq!(names, OutputFormat::NAMES);
    }
}
