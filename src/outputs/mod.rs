//! Typed result collections and their text encodings.
//!
//! An [`Outputs`] value owns an ordered, homogeneous list of one [`Record`] kind and
//! renders it as CSV, JSON, or JSON lines. Collections are created per extraction
//! call and never shared.

pub mod encode;
pub mod format;
pub mod record;

use std::fs;
use std::path::Path;

use tracing::debug;

pub use format::OutputFormat;
pub use record::{CSV_TIMESTAMP_FORMAT, Record};

use crate::error::Result;
use crate::models::{BookmarkRecord, CookieRecord, HistoryRecord};

pub type HistoryOutputs = Outputs<HistoryRecord>;
pub type BookmarkOutputs = Outputs<BookmarkRecord>;
pub type CookieOutputs = Outputs<CookieRecord>;

/// Records sharing one network authority, in their original relative order
#[derive(Debug, Clone, PartialEq)]
pub struct DomainGroup<R> {
    pub domain: String,
    pub records: Vec<R>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outputs<R> {
    records: Vec<R>,
}

impl<R> Default for Outputs<R> {
    fn default() -> Self {
        Self { records: Vec::new() }
    }
}

impl<R: Record> Outputs<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<R>) -> Self {
        Self { records }
    }

    pub fn fields(&self) -> &'static [&'static str] {
        R::FIELDS
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = R>) {
        self.records.extend(records);
    }

    /// Moves every record of `other` to the end of this collection
    pub fn append(&mut self, other: Outputs<R>) {
        self.records.extend(other.records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Stable sort on the record kind's null-safe key
    pub fn sort(&mut self, descending: bool) {
        if descending {
            self.records.sort_by(|a, b| b.sort_cmp(a));
        } else {
            self.records.sort_by(|a, b| a.sort_cmp(b));
        }
    }

    pub fn to_csv(&self) -> Result<String> {
        encode::to_csv(&self.records)
    }

    pub fn to_json(&self, lines: bool) -> Result<String> {
        encode::to_json(&self.records, lines)
    }

    /// Renders the collection with a registered format
    pub fn formatted(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Csv => self.to_csv(),
            OutputFormat::Json => self.to_json(false),
            OutputFormat::Jsonl => self.to_json(true),
        }
    }

    /// Buckets records by the raw network authority of their URL
    ///
    /// The authority is taken as written: userinfo, explicit ports and letter case are
    /// kept. Buckets appear in first-occurrence order. URLs without a `scheme://`
    /// prefix land in the `""` bucket.
    pub fn group_by_domain(&self) -> Vec<DomainGroup<R>> {
        let mut groups: Vec<DomainGroup<R>> = Vec::new();

        for record in &self.records {
            let domain = domain_of(record.url()).to_string();
            match groups.iter_mut().find(|g| g.domain == domain) {
                Some(group) => group.records.push(record.clone()),
                None => groups.push(DomainGroup { domain, records: vec![record.clone()] }),
            }
        }

        groups
    }

    /// Writes the collection to `path`
    ///
    /// # Errors
    ///
    /// With no explicit `format`, returns [`crate::Error::InvalidFormat`] when the
    /// extension of `path` is not a registered format. I/O failures propagate.
    pub fn save(&self, path: &Path, format: Option<OutputFormat>) -> Result<()> {
        let format = match format {
            Some(format) => format,
            None => OutputFormat::from_path(path)?,
        };
        let text = self.formatted(format)?;
        fs::write(path, text)?;
        debug!("wrote {} {} records to {}", self.len(), R::KIND, path.display());
        Ok(())
    }
}

impl<'a, R> IntoIterator for &'a Outputs<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// The text between `scheme://` and the first `/`, `?` or `#`
fn domain_of(raw: &str) -> &str {
    let Some((scheme, rest)) = raw.split_once("://") else {
        return "";
    };
    if !is_scheme(scheme) {
        return "";
    }
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    &rest[..end]
}

fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
