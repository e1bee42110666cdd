use std::io;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::ser::PrettyFormatter;

use super::record::Record;
use crate::error::{Error, Result};

/// Header row plus one row per record, CRLF-terminated with minimal quoting
pub fn to_csv<R: Record>(records: &[R]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new().terminator(csv::Terminator::CRLF).from_writer(Vec::new());

    writer.write_record(R::FIELDS)?;
    for record in records {
        writer.write_record(record.csv_row())?;
    }

    let bytes = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
    into_utf8(bytes)
}

/// `{"<kind>": [...]}` pretty-printed with 4-space indents, or compact JSON lines
pub fn to_json<R: Record>(records: &[R], lines: bool) -> Result<String> {
    if lines {
        let mut out = Vec::with_capacity(records.len());
        for record in records {
            out.push(serde_json::to_string(record)?);
        }
        return Ok(out.join("\n"));
    }

    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    KeyedRecords { kind: R::KIND, records }.serialize(&mut ser)?;
    into_utf8(buf)
}

// Serializes as a single-entry map so record field order survives (serde_json::Map
// would sort keys)
struct KeyedRecords<'a, R> {
    kind: &'static str,
    records: &'a [R],
}

impl<R: Serialize> Serialize for KeyedRecords<'_, R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.kind, self.records)?;
        map.end()
    }
}

fn into_utf8(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| Error::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}
