use std::borrow::Cow;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};

use super::polymerize::{merge_optional_sum, polymerize};
use super::{CellValue, ChartKind, Row, XKey};

/// Name reserved for the synthetic stacked-total series.
pub const TOTAL_SERIES_NAME: &str = "@@total";

/// Key under which the complete source row is kept inside [`SourcePoint::row`].
pub const RAW_ROW_KEY: &str = "$raw";

/// Y axis a series is plotted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisRef {
    #[default]
    #[serde(rename = "y")]
    Y,
    #[serde(rename = "y2")]
    Y2,
}

impl AxisRef {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Y => "y",
            Self::Y2 => "y2",
        }
    }
}

/// Trace visibility. Only [`Visibility::Visible`] series take part in the
/// data stage; legend-only series keep their previous arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
    LegendOnly,
}

impl Visibility {
    #[must_use]
    pub fn is_visible(self) -> bool {
        self == Self::Visible
    }
}

impl Serialize for Visibility {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Visible => serializer.serialize_bool(true),
            Self::Hidden => serializer.serialize_bool(false),
            Self::LegendOnly => serializer.serialize_str("legendonly"),
        }
    }
}

impl<'de> Deserialize<'de> for Visibility {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Bool(true) => Ok(Self::Visible),
            serde_json::Value::String(text) if text == "legendonly" => Ok(Self::LegendOnly),
            _ => Ok(Self::Hidden),
        }
    }
}

/// One contributing data point, as produced from a dataset row.
///
/// `x`/`y` hold values already normalized for plotting; `row` keeps the
/// original cells (`x`, `y`, `yError`, `size` and the full row under
/// [`RAW_ROW_KEY`]) so labels can be re-derived with a different format.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourcePoint {
    pub x: XKey,
    pub y: Option<f64>,
    pub y_error: Option<f64>,
    pub y_percent: Option<f64>,
    pub size: Option<f64>,
    pub row: Row,
}

impl SourcePoint {
    /// Builds a point whose original cells equal the plotted ones.
    #[must_use]
    pub fn new(x: XKey, y: Option<f64>) -> Self {
        let mut row = Row::new();
        row.insert("x".to_owned(), x.to_cell());
        row.insert("y".to_owned(), CellValue::from(y));
        Self {
            x,
            y,
            row,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_y_error(mut self, y_error: f64) -> Self {
        self.y_error = Some(y_error);
        self.row.insert("yError".to_owned(), CellValue::Number(y_error));
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self.row.insert("size".to_owned(), CellValue::Number(size));
        self
    }

    /// Replaces the original (pre-normalization) cells.
    #[must_use]
    pub fn with_row(mut self, row: Row) -> Self {
        self.row = row;
        self
    }

    /// Original, unnormalized X cell.
    #[must_use]
    pub fn original_x(&self) -> CellValue {
        self.row
            .get("x")
            .cloned()
            .unwrap_or_else(|| self.x.to_cell())
    }

    /// Original, unnormalized Y cell.
    #[must_use]
    pub fn original_y(&self) -> CellValue {
        self.row
            .get("y")
            .cloned()
            .unwrap_or_else(|| CellValue::from(self.y))
    }

    /// Full source row, if one was attached.
    #[must_use]
    pub fn raw_row(&self) -> Option<&Row> {
        match self.row.get(RAW_ROW_KEY) {
            Some(CellValue::Object(raw)) => Some(raw),
            _ => None,
        }
    }

    /// Collapses points sharing one X into a single point; numbers are summed.
    ///
    /// The shared X cell is kept as-is rather than summed.
    #[must_use]
    pub fn polymerize(points: &[SourcePoint]) -> SourcePoint {
        let mut merged = SourcePoint {
            x: points.last().map(|p| p.x.clone()).unwrap_or_default(),
            row: polymerize(points.iter().map(|p| &p.row)),
            ..SourcePoint::default()
        };
        if let Some(last) = points.last() {
            merged.row.insert("x".to_owned(), last.original_x());
        }
        for point in points {
            merged.y = merge_optional_sum(merged.y, point.y);
            merged.y_error = merge_optional_sum(merged.y_error, point.y_error);
            merged.y_percent = merge_optional_sum(merged.y_percent, point.y_percent);
            merged.size = merge_optional_sum(merged.size, point.size);
        }
        merged
    }
}

/// `sourceData` value: one row, or every row that mapped to the same X.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceEntry {
    Single(SourcePoint),
    Multi(Vec<SourcePoint>),
}

impl SourceEntry {
    pub fn points(&self) -> &[SourcePoint] {
        match self {
            Self::Single(point) => std::slice::from_ref(point),
            Self::Multi(points) => points,
        }
    }

    pub fn points_mut(&mut self) -> &mut [SourcePoint] {
        match self {
            Self::Single(point) => std::slice::from_mut(point),
            Self::Multi(points) => points,
        }
    }

    /// Single point view of the entry, merging multi-row buckets.
    #[must_use]
    pub fn merged(&self) -> Cow<'_, SourcePoint> {
        match self {
            Self::Single(point) => Cow::Borrowed(point),
            Self::Multi(points) => Cow::Owned(SourcePoint::polymerize(points)),
        }
    }

    fn push(&mut self, point: SourcePoint) {
        match self {
            Self::Single(first) => {
                let first = std::mem::take(first);
                *self = Self::Multi(vec![first, point]);
            }
            Self::Multi(points) => points.push(point),
        }
    }
}

pub type SourceData = IndexMap<XKey, SourceEntry>;

/// Error bar payload of a trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBars {
    #[serde(rename = "type")]
    pub kind: String,
    pub visible: bool,
    pub array: Vec<Option<f64>>,
}

impl Default for ErrorBars {
    fn default() -> Self {
        Self {
            kind: "data".to_owned(),
            visible: true,
            array: Vec::new(),
        }
    }
}

/// One logical trace handed to the renderer.
///
/// The caller owns the series buffer across render cycles. The data stage
/// reads `source_data` and rewrites the derived fields (`x`, `y`, `text`,
/// `error_y.array`); it never reads its own previous output, so running it
/// twice yields the same result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_trace_type"
    )]
    pub kind: Option<ChartKind>,
    #[serde(default)]
    pub x: Vec<XKey>,
    #[serde(default)]
    pub y: Vec<Option<f64>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<XKey>,
    #[serde(default)]
    pub text: Vec<String>,
    #[serde(default)]
    pub error_y: ErrorBars,
    #[serde(default)]
    pub yaxis: AxisRef,
    #[serde(default)]
    pub visible: Visibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hoverinfo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub textposition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip)]
    pub source_data: SourceData,
}

fn serialize_trace_type<S: Serializer>(
    kind: &Option<ChartKind>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match kind {
        Some(kind) => serializer.serialize_str(kind.trace_type()),
        None => serializer.serialize_none(),
    }
}

impl Series {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: None,
            x: Vec::new(),
            y: Vec::new(),
            labels: Vec::new(),
            text: Vec::new(),
            error_y: ErrorBars::default(),
            yaxis: AxisRef::Y,
            visible: Visibility::Visible,
            hoverinfo: None,
            textposition: None,
            showlegend: None,
            source_data: SourceData::new(),
        }
    }

    /// Builds a series from points in dataset order.
    #[must_use]
    pub fn from_points(
        name: impl Into<String>,
        points: impl IntoIterator<Item = SourcePoint>,
    ) -> Self {
        let mut series = Self::new(name);
        for point in points {
            series.push_point(point);
        }
        series.rebuild_from_source();
        series
    }

    #[must_use]
    pub fn with_kind(mut self, kind: ChartKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn with_yaxis(mut self, yaxis: AxisRef) -> Self {
        self.yaxis = yaxis;
        self
    }

    #[must_use]
    pub fn with_visibility(mut self, visible: Visibility) -> Self {
        self.visible = visible;
        self
    }

    /// Records a point in `source_data`; a repeated X turns the bucket into a
    /// multi-row entry.
    pub fn push_point(&mut self, point: SourcePoint) {
        match self.source_data.get_mut(&point.x) {
            Some(entry) => entry.push(point),
            None => {
                self.source_data
                    .insert(point.x.clone(), SourceEntry::Single(point));
            }
        }
    }

    /// Resets `x`/`y`/`error_y.array` to one position per source bucket.
    pub fn rebuild_from_source(&mut self) {
        self.x.clear();
        self.y.clear();
        self.error_y.array.clear();
        for (key, entry) in &self.source_data {
            let merged = entry.merged();
            self.x.push(key.clone());
            self.y.push(merged.y);
            self.error_y.array.push(merged.y_error);
        }
    }

    #[must_use]
    pub fn is_total(&self) -> bool {
        self.name == TOTAL_SERIES_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_x_becomes_multi_entry() {
        let series = Series::from_points(
            "a",
            [
                SourcePoint::new(XKey::text("k"), Some(1.0)),
                SourcePoint::new(XKey::text("k"), Some(2.5)),
                SourcePoint::new(XKey::text("m"), Some(4.0)),
            ],
        );
        assert_eq!(series.x, vec![XKey::text("k"), XKey::text("m")]);
        assert_eq!(series.y, vec![Some(3.5), Some(4.0)]);
        assert!(matches!(
            series.source_data.get(&XKey::text("k")),
            Some(SourceEntry::Multi(points)) if points.len() == 2
        ));
    }

    #[test]
    fn visibility_serializes_like_plotly() {
        assert_eq!(serde_json::to_string(&Visibility::Visible).expect("json"), "true");
        assert_eq!(
            serde_json::to_string(&Visibility::LegendOnly).expect("json"),
            "\"legendonly\""
        );
    }
}
