//! Cell values, records, and the value comparison chain used for sorting.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

/// A primitive cell value
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Interpret the value as a point in time, if it looks like one.
    ///
    /// Only text is considered; numbers keep their own sort tier.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::Text(text) => parse_datetime(text),
            _ => None,
        }
    }
}

/// Whole numbers small enough to be exact as `i64`.
fn as_integral(n: f64) -> Option<i64> {
    (n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15).then_some(n as i64)
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Number(n) => match as_integral(*n) {
                Some(i) => write!(f, "{i}"),
                None => write!(f, "{n}"),
            },
            CellValue::Text(text) => f.write_str(text),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Null => serializer.serialize_none(),
            CellValue::Number(n) => match as_integral(*n) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
            CellValue::Text(text) => serializer.serialize_str(text),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}

/// One row of tabular data: field name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, CellValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Value for `key`; missing fields are `None`, never `Null`.
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.fields.get(key)
    }

    /// Display string for `key`, empty when missing or null.
    pub fn text(&self, key: &str) -> String {
        self.get(key).map(|value| value.to_string()).unwrap_or_default()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

/// Comparison key for a single value. Values of different kinds never
/// compare directly; the variant order is the cross-kind order.
enum SortKey<'a> {
    Null,
    Number(f64),
    Date(NaiveDateTime),
    Text(&'a str),
}

impl CellValue {
    fn sort_key(&self) -> SortKey<'_> {
        match self {
            CellValue::Null => SortKey::Null,
            CellValue::Number(n) => SortKey::Number(*n),
            CellValue::Text(text) => match self.as_datetime() {
                Some(dt) => SortKey::Date(dt),
                None => SortKey::Text(text),
            },
        }
    }
}

impl SortKey<'_> {
    fn tier(&self) -> u8 {
        match self {
            SortKey::Null => 0,
            SortKey::Number(_) => 1,
            SortKey::Date(_) => 2,
            SortKey::Text(_) => 3,
        }
    }
}

/// Compare two values: numbers, then dates, then text.
///
/// Mixed kinds order by kind first, so the result is a total order even when
/// a column holds numbers next to numeric-looking or date text.
pub fn compare_values(a: &CellValue, b: &CellValue) -> Ordering {
    match (a.sort_key(), b.sort_key()) {
        (SortKey::Number(x), SortKey::Number(y)) => x.total_cmp(&y),
        (SortKey::Date(x), SortKey::Date(y)) => x.cmp(&y),
        (SortKey::Text(x), SortKey::Text(y)) => locale_cmp(x, y),
        (x, y) => x.tier().cmp(&y.tier()),
    }
}

/// Case-insensitive primary order with lowercase-first tie break.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

pub fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
