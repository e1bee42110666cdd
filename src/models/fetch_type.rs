use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::models::{BookmarkRecord, HistoryRecord};
use crate::outputs::Record;

/// What a CLI run extracts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchType {
    History,
    Bookmarks,
}

impl FetchType {
    pub fn as_str(self) -> &'static str {
        match self {
            FetchType::History => "history",
            FetchType::Bookmarks => "bookmarks",
        }
    }

    /// Column names of the records this fetch type produces
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            FetchType::History => HistoryRecord::FIELDS,
            FetchType::Bookmarks => BookmarkRecord::FIELDS,
        }
    }
}

impl FromStr for FetchType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "history" => Ok(FetchType::History),
            "bookmarks" => Ok(FetchType::Bookmarks),
            _ => Err(Error::InvalidFetchType(s.to_string())),
        }
    }
}

impl fmt::Display for FetchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("History".parse::<FetchType>().unwrap(), FetchType::History);
        assert_eq!("BOOKMARKS".parse::<FetchType>().unwrap(), FetchType::Bookmarks);
    }

    #[test]
    fn test_unknown_type() {
        let err = "passwords".parse::<FetchType>().unwrap_err();
        assert_eq!(err.to_string(), "Type passwords is unavailable. Check --help for available types");
    }

    #[test]
    fn test_fields() {
        assert_eq!(FetchType::History.fields(), &["Timestamp", "URL", "Title"]);
        assert_eq!(FetchType::Bookmarks.fields(), &["Timestamp", "URL", "Title", "Folder"]);
    }
}
