//! Assignment datasets: built-in samples or local CSV / JSON files.

pub mod sample;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::grid::{CellValue, Record};

#[derive(Debug, Error)]
pub enum DataError {
    #[error("read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse csv {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("parse json {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{}: expected a JSON array of objects", path.display())]
    NotAnArray { path: PathBuf },
    #[error("{}: row {row} is not a JSON object", path.display())]
    NotAnObject { path: PathBuf, row: usize },
    #[error("{}: unsupported file type (expected .csv or .json)", path.display())]
    UnsupportedFormat { path: PathBuf },
}

/// Where a dataset came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Sample,
    File(PathBuf),
}

impl Source {
    pub fn describe(&self) -> String {
        match self {
            Source::Sample => "sample".to_string(),
            Source::File(path) => path.display().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<Record>,
    pub source: Source,
}

impl Dataset {
    pub fn sample(records: Vec<Record>) -> Self {
        Self {
            records,
            source: Source::Sample,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Both assignment lists the pages draw from
#[derive(Debug, Clone)]
pub struct Datasets {
    pub completed: Dataset,
    pub ongoing: Dataset,
}

impl Datasets {
    pub fn samples() -> Self {
        Self {
            completed: Dataset::sample(sample::completed()),
            ongoing: Dataset::sample(sample::ongoing()),
        }
    }
}

impl Default for Datasets {
    fn default() -> Self {
        Self::samples()
    }
}

/// Load records from `path`, dispatching on the file extension.
pub fn load_records(path: &Path) -> Result<Vec<Record>, DataError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase);
    match extension.as_deref() {
        Some("csv") => load_csv(path),
        Some("json") => load_json(path),
        _ => Err(DataError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Load `path` when given, otherwise the fallback sample.
pub fn load_or_sample(
    path: Option<&Path>,
    sample: fn() -> Vec<Record>,
) -> (Dataset, Option<DataError>) {
    let Some(path) = path else {
        return (Dataset::sample(sample()), None);
    };
    match load_records(path) {
        Ok(records) => {
            tracing::info!(path = %path.display(), count = records.len(), "loaded dataset");
            (
                Dataset {
                    records,
                    source: Source::File(path.to_path_buf()),
                },
                None,
            )
        }
        Err(err) => {
            tracing::warn!(error = %err, "falling back to sample data");
            (Dataset::sample(sample()), Some(err))
        }
    }
}

fn load_csv(path: &Path) -> Result<Vec<Record>, DataError> {
    let csv_err = |source| DataError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;
    let headers = reader.headers().map_err(csv_err)?.clone();
    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(csv_err)?;
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(key, value)| (key.trim(), value))
            .collect();
        records.push(record);
    }
    Ok(records)
}

fn load_json(path: &Path) -> Result<Vec<Record>, DataError> {
    let content = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&content).map_err(|source| DataError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let Value::Array(items) = value else {
        return Err(DataError::NotAnArray {
            path: path.to_path_buf(),
        });
    };
    items
        .into_iter()
        .enumerate()
        .map(|(row, item)| match item {
            Value::Object(map) => Ok(map
                .into_iter()
                .map(|(key, value)| (key, json_cell(value)))
                .collect()),
            _ => Err(DataError::NotAnObject {
                path: path.to_path_buf(),
                row,
            }),
        })
        .collect()
}

fn json_cell(value: Value) -> CellValue {
    match value {
        Value::Null => CellValue::Null,
        Value::Number(n) => n
            .as_f64()
            .map(CellValue::Number)
            .unwrap_or_else(|| CellValue::Text(n.to_string())),
        Value::String(s) => CellValue::Text(s),
        Value::Bool(b) => CellValue::Text(b.to_string()),
        other => CellValue::Text(other.to_string()),
    }
}
