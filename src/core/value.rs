use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize, Serializer};

/// One record of a query result. Field order is the column order of the result.
pub type Row = IndexMap<String, CellValue>;

/// A single cell of a tabular dataset, or a nested value inside a row.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    DateTime(DateTime<Utc>),
    Array(Vec<CellValue>),
    Object(Row),
}

impl CellValue {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the numeric value for `Number` cells only; text is never coerced.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Loose numeric parse used by pivot aggregators (`parseFloat` style).
    #[must_use]
    pub fn parse_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => parse_leading_float(text),
            Self::Bool(_) | Self::Null | Self::DateTime(_) | Self::Array(_) | Self::Object(_) => {
                None
            }
        }
    }

    /// Text shown for a cell when it is substituted into a label.
    #[must_use]
    pub fn display_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(value) => value.to_string(),
            Self::Number(value) => format_plain_number(*value),
            Self::Text(value) => value.clone(),
            Self::DateTime(value) => value.to_rfc3339_opts(SecondsFormat::Millis, true),
            Self::Array(_) | Self::Object(_) => serde_json::Value::from(self.clone()).to_string(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<serde_json::Value> for CellValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(value) => Self::Bool(value),
            serde_json::Value::Number(number) => number.as_f64().map_or(Self::Null, Self::Number),
            serde_json::Value::String(text) => Self::Text(text),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<CellValue> for serde_json::Value {
    fn from(value: CellValue) -> Self {
        match value {
            CellValue::Null => Self::Null,
            CellValue::Bool(value) => Self::Bool(value),
            CellValue::Number(value) => {
                serde_json::Number::from_f64(value).map_or(Self::Null, Self::Number)
            }
            CellValue::Text(text) => Self::String(text),
            CellValue::DateTime(value) => {
                Self::String(value.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            CellValue::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            CellValue::Object(row) => Self::Object(
                row.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde_json::Value::from(self.clone()).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}

/// Converts a JSON object into a [`Row`]; non-object input yields an empty row.
#[must_use]
pub fn row_from_json(value: serde_json::Value) -> Row {
    match CellValue::from(value) {
        CellValue::Object(row) => row,
        _ => Row::new(),
    }
}

/// Key of one plotted X position.
///
/// X values are normalized before they become keys, so date/time cells are
/// already rendered to text here. Keys order as null < numbers < text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum XKey {
    #[default]
    Null,
    Number(OrderedFloat<f64>),
    Text(String),
}

impl XKey {
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(OrderedFloat(value))
    }

    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Builds a key from an already-normalized cell.
    #[must_use]
    pub fn from_cell(value: &CellValue) -> Self {
        match value {
            CellValue::Null => Self::Null,
            CellValue::Number(value) => Self::number(*value),
            CellValue::Text(text) => Self::Text(text.clone()),
            other => Self::Text(other.display_text()),
        }
    }

    #[must_use]
    pub fn to_cell(&self) -> CellValue {
        match self {
            Self::Null => CellValue::Null,
            Self::Number(value) => CellValue::Number(value.0),
            Self::Text(text) => CellValue::Text(text.clone()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Number(_) => 1,
            Self::Text(_) => 2,
        }
    }
}

impl Ord for XKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for XKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for XKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Number(value) => f.write_str(&format_plain_number(value.0)),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl Serialize for XKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Number(value) => serializer.serialize_f64(value.0),
            Self::Text(text) => serializer.serialize_str(text),
        }
    }
}

impl<'de> Deserialize<'de> for XKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        CellValue::deserialize(deserializer).map(|value| Self::from_cell(&value))
    }
}

/// Renders a number the way a plain `toString` would: integers without a
/// trailing `.0`, everything else in shortest round-trip form.
#[must_use]
pub fn format_plain_number(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if value.fract() == 0.0 && value.abs() < 1e21 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

fn parse_leading_float(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut seen_exp = false;
    let bytes = trimmed.as_bytes();
    while end < bytes.len() {
        let byte = bytes[end];
        match byte {
            b'0'..=b'9' => seen_digit = true,
            b'+' | b'-' if end == 0 => {}
            b'+' | b'-' if seen_exp && matches!(bytes[end - 1], b'e' | b'E') => {}
            b'.' if !seen_dot && !seen_exp => seen_dot = true,
            b'e' | b'E' if seen_digit && !seen_exp => seen_exp = true,
            _ => break,
        }
        end += 1;
    }
    let mut candidate = &trimmed[..end];
    while !candidate.is_empty() {
        if let Ok(value) = candidate.parse::<f64>() {
            return Some(value);
        }
        candidate = &candidate[..candidate.len() - 1];
    }
    None
}
