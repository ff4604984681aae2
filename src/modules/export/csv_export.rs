//! CSV Export
//!
//! Writes assignment records to CSV files.

use crate::grid::Record;
use std::path::Path;

/// Write records to CSV file, one column per entry in `header`
pub fn write_records(
    path: &Path,
    header: &[String],
    records: &[Record],
) -> Result<usize, Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(header)?;

    for record in records {
        wtr.write_record(header.iter().map(|key| record.text(key)))?;
    }

    wtr.flush()?;
    Ok(records.len())
}
