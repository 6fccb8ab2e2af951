use std::fmt;

use serde::{Deserialize, Serialize};

use super::CellValue;
use super::datetime_format::{DateTimePattern, parse_instant};

/// Axis scale type as written in chart options.
///
/// Unknown strings survive as [`AxisType::Other`] and are handled like a
/// category axis by every stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AxisType {
    /// Let the renderer infer the scale (`"-"`).
    Auto,
    Linear,
    Logarithmic,
    Datetime,
    Category,
    CustomTime,
    Other(String),
}

impl AxisType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Auto => "-",
            Self::Linear => "linear",
            Self::Logarithmic => "logarithmic",
            Self::Datetime => "datetime",
            Self::Category => "category",
            Self::CustomTime => "customTime",
            Self::Other(value) => value,
        }
    }

    /// Scale type understood by the plotting surface.
    #[must_use]
    pub fn scale_type(&self) -> String {
        match self {
            Self::Datetime => "date".to_owned(),
            Self::Logarithmic => "log".to_owned(),
            Self::CustomTime => "category".to_owned(),
            other => other.as_str().to_owned(),
        }
    }
}

impl From<String> for AxisType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "-" => Self::Auto,
            "linear" => Self::Linear,
            "logarithmic" => Self::Logarithmic,
            "datetime" => Self::Datetime,
            "category" => Self::Category,
            "customTime" => Self::CustomTime,
            _ => Self::Other(value),
        }
    }
}

impl From<AxisType> for String {
    fn from(value: AxisType) -> Self {
        value.as_str().to_owned()
    }
}

impl fmt::Display for AxisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Converts a raw cell into the representation used on an axis.
///
/// On a date/time axis any cell that parses as an instant is rendered with
/// `date_time_format`; every other cell is returned unchanged. Date/time cells
/// are always rendered, whatever the axis, so the plotted value is text.
///
/// Plotting code passes the machine format and label code passes the user's
/// display format; the two results must not be mixed.
#[must_use]
pub fn normalize_value(
    value: &CellValue,
    axis_type: Option<&AxisType>,
    date_time_format: &str,
) -> CellValue {
    let instant = match (axis_type, value) {
        (Some(AxisType::Datetime), _) => parse_instant(value),
        (_, CellValue::DateTime(instant)) => Some(*instant),
        _ => None,
    };
    match instant {
        Some(instant) => CellValue::Text(DateTimePattern::compile(date_time_format).format(instant)),
        None => value.clone(),
    }
}
