//! Export Module
//!
//! Writes selected (or all visible) assignments to disk.
//!
//! - 'e' key or `:export` triggers export on list pages
//! - Records are written twice: CSV for spreadsheets, JSON with typed values
//! - Files saved to <data dir>/exports/

mod csv_export;
mod json_export;

use crate::config;
use crate::core::{Action, NotifyLevel};
use crate::grid::{ColumnSpec, Record};
use chrono::Local;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the export directory path, creating it if needed
fn get_export_dir() -> std::io::Result<PathBuf> {
    let export_dir = config::exports_dir();
    fs::create_dir_all(&export_dir)?;
    Ok(export_dir)
}

/// Generate a timestamped file stem shared by the CSV and JSON outputs
fn generate_stem(prefix: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d-%H%M%S");
    format!("{}-{}", prefix, timestamp)
}

/// Column keys present in the data first, then any remaining fields sorted
pub fn export_header(columns: &[ColumnSpec], records: &[Record]) -> Vec<String> {
    let present: BTreeSet<&str> = records
        .iter()
        .flat_map(|record| record.fields().map(|(key, _)| key))
        .collect();
    let mut header: Vec<String> = columns
        .iter()
        .map(|column| column.key.as_str())
        .filter(|key| present.contains(key))
        .map(str::to_string)
        .collect();
    for key in present {
        if !header.iter().any(|existing| existing == key) {
            header.push(key.to_string());
        }
    }
    header
}

/// Export records for a page, reporting the outcome as a notification
pub fn export_records(prefix: &str, columns: &[ColumnSpec], records: &[Record]) -> Action {
    if records.is_empty() {
        return Action::Notify("No records to export".to_string(), NotifyLevel::Warn);
    }

    let export_dir = match get_export_dir() {
        Ok(dir) => dir,
        Err(e) => {
            return Action::Notify(
                format!("Failed to create export directory: {}", e),
                NotifyLevel::Error,
            )
        }
    };

    match write_to(&export_dir, prefix, columns, records) {
        Ok((count, csv_name)) => {
            tracing::info!(dir = %export_dir.display(), count, "exported records");
            Action::Notify(
                format!("Exported {} records to {}", count, export_dir.join(csv_name).display()),
                NotifyLevel::Info,
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "export failed");
            Action::Notify(format!("Export failed: {}", e), NotifyLevel::Error)
        }
    }
}

fn write_to(
    dir: &Path,
    prefix: &str,
    columns: &[ColumnSpec],
    records: &[Record],
) -> Result<(usize, String), Box<dyn std::error::Error>> {
    let header = export_header(columns, records);
    let stem = generate_stem(prefix);
    let csv_name = format!("{stem}.csv");
    let count = csv_export::write_records(&dir.join(&csv_name), &header, records)?;
    json_export::write_records(&dir.join(format!("{stem}.json")), records)?;
    Ok((count, csv_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellValue;

    fn records() -> Vec<Record> {
        vec![
            Record::new()
                .with("invoice", "1261756")
                .with("driver", "Adam")
                .with("podUrl", "/pods/1261756.pdf"),
            Record::new()
                .with("invoice", "1261757")
                .with("driver", "Mark, Jr.")
                .with("eta", CellValue::Null),
        ]
    }

    #[test]
    fn test_header_orders_columns_first() {
        let columns = vec![
            ColumnSpec::new("invoice", "Invoice No."),
            ColumnSpec::new("pod", "Proof of Delivery"),
            ColumnSpec::new("driver", "Driver Name"),
        ];
        assert_eq!(
            export_header(&columns, &records()),
            vec!["invoice", "driver", "eta", "podUrl"]
        );
    }

    #[test]
    fn test_write_csv_and_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let columns = vec![ColumnSpec::new("invoice", "Invoice No.")];
        let (count, csv_name) =
            write_to(dir.path(), "completed", &columns, &records()).expect("export");
        assert_eq!(count, 2);

        let csv = fs::read_to_string(dir.path().join(&csv_name)).expect("csv written");
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("invoice,driver,eta,podUrl"));
        assert_eq!(lines.next(), Some("1261756,Adam,,/pods/1261756.pdf"));
        assert_eq!(lines.next(), Some("1261757,\"Mark, Jr.\",,"));

        let json_name = csv_name.replace(".csv", ".json");
        let json = fs::read_to_string(dir.path().join(json_name)).expect("json written");
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(parsed[1]["eta"], serde_json::Value::Null);
        assert_eq!(parsed[0]["driver"], "Adam");
    }
}
