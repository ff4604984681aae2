//! JSON Export
//!
//! Writes assignment records to JSON files, keeping numbers and nulls typed.

use crate::grid::Record;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Write records to a pretty-printed JSON array
pub fn write_records(path: &Path, records: &[Record]) -> Result<usize, Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(records)?;

    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;

    Ok(records.len())
}
