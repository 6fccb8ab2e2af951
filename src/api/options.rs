use std::ops::Deref;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::core::{AxisType, ChartKind, DEFAULT_DISPLAY_DATE_TIME_FORMAT};
use crate::error::{ChartError, ChartResult};

pub const CHART_OPTIONS_SCHEMA_V1: u32 = 1;

pub const DEFAULT_NUMBER_FORMAT: &str = "0,0[.]00000";
pub const DEFAULT_PERCENT_FORMAT: &str = "0[.]00%";
pub const DEFAULT_CONSTANT_LINE_LIMIT: usize = 4;
pub const LINE_MARKER_SIZE: u32 = 6;

/// Stacking mode as stored in options.
///
/// `Normal` and `Percent` are legacy spellings; resolution rewrites both to
/// `Stack` (the latter also turning on percent values).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackingMode {
    Stack,
    Normal,
    Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendOptions {
    pub enabled: bool,
    pub placement: String,
    pub traceorder: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for LegendOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            placement: "auto".to_owned(),
            traceorder: "normal".to_owned(),
            extra: serde_json::Map::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisTitle {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisLabelOptions {
    pub enabled: bool,
}

impl Default for AxisLabelOptions {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XAxisOptions {
    #[serde(rename = "type")]
    pub axis_type: AxisType,
    pub labels: Option<AxisLabelOptions>,
    pub title: Option<AxisTitle>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for XAxisOptions {
    fn default() -> Self {
        Self {
            axis_type: AxisType::Auto,
            labels: Some(AxisLabelOptions::default()),
            title: None,
            extra: serde_json::Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YAxisOptions {
    #[serde(rename = "type")]
    pub axis_type: AxisType,
    pub title: Option<AxisTitle>,
    pub opposite: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for YAxisOptions {
    fn default() -> Self {
        Self {
            axis_type: AxisType::Linear,
            title: None,
            opposite: false,
            extra: serde_json::Map::new(),
        }
    }
}

impl YAxisOptions {
    #[must_use]
    pub fn secondary() -> Self {
        Self {
            opposite: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeriesGlobalOptions {
    #[serde(deserialize_with = "lenient_stacking")]
    pub stacking: Option<StackingMode>,
    pub percent_values: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Reads `stacking` by truthiness: empty, `false` and `null` disable it, legacy
/// names keep their variant, and any other truthy value means `Stack`.
fn lenient_stacking<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<StackingMode>, D::Error> {
    use serde_json::Value;

    Ok(match Value::deserialize(deserializer)? {
        Value::String(mode) => match mode.as_str() {
            "" => None,
            "normal" => Some(StackingMode::Normal),
            "percent" => Some(StackingMode::Percent),
            _ => Some(StackingMode::Stack),
        },
        Value::Bool(enabled) => enabled.then_some(StackingMode::Stack),
        Value::Number(number) => number
            .as_f64()
            .filter(|value| *value != 0.0 && !value.is_nan())
            .map(|_| StackingMode::Stack),
        Value::Array(_) | Value::Object(_) => Some(StackingMode::Stack),
        Value::Null => None,
    })
}

/// Per-series overrides keyed by series name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeriesOptions {
    #[serde(rename = "type")]
    pub kind: Option<ChartKind>,
    pub y_axis: u8,
    pub z_index: i32,
    pub name: Option<String>,
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Axis a reference line is measured against.
///
/// `X` lines are horizontal: they span the X range at a fixed Y value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum ReferenceAxis {
    #[default]
    X,
    Y,
}

impl From<u8> for ReferenceAxis {
    fn from(value: u8) -> Self {
        if value == 1 { Self::Y } else { Self::X }
    }
}

impl From<ReferenceAxis> for u8 {
    fn from(value: ReferenceAxis) -> Self {
        match value {
            ReferenceAxis::X => 0,
            ReferenceAxis::Y => 1,
        }
    }
}

/// Stroke style of a reference line.
///
/// Saved configs spell the bold style `blodSolid`; `boldSolid` is read too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LineFormat {
    #[default]
    Solid,
    BoldSolid,
    Dotted,
}

impl From<String> for LineFormat {
    fn from(value: String) -> Self {
        match value.as_str() {
            "boldSolid" | "blodSolid" => Self::BoldSolid,
            "dotted" => Self::Dotted,
            _ => Self::Solid,
        }
    }
}

impl From<LineFormat> for String {
    fn from(value: LineFormat) -> Self {
        match value {
            LineFormat::Solid => "solid",
            LineFormat::BoldSolid => "blodSolid",
            LineFormat::Dotted => "dotted",
        }
        .to_owned()
    }
}

/// User-configured constant line overlaid on the plot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceLine {
    pub name: String,
    pub reference: ReferenceAxis,
    #[serde(deserialize_with = "lenient_number")]
    pub value: Option<f64>,
    pub color: String,
    pub format: LineFormat,
}

impl ReferenceLine {
    #[must_use]
    pub fn new(name: impl Into<String>, reference: ReferenceAxis, value: f64) -> Self {
        Self {
            name: name.into(),
            reference,
            value: Some(value),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LineFormat) -> Self {
        self.format = format;
        self
    }

    /// Lines without a finite numeric value are not configured yet.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.value.is_some_and(f64::is_finite)
    }
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(serde_json::Value::deserialize(deserializer)?.as_f64())
}

/// Role of a dataset column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnRole {
    X,
    Y,
    Series,
    YError,
    Size,
    #[serde(other)]
    Unused,
}

/// Chart visualization options, schema v1.
///
/// Every field has a documented default, so a partial JSON object fills the
/// gaps field by field. Keys the schema does not know are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    #[serde(default)]
    pub global_series_type: ChartKind,
    #[serde(default = "default_true")]
    pub sort_x: bool,
    #[serde(default)]
    pub reverse_x: bool,
    #[serde(default)]
    pub legend: LegendOptions,
    #[serde(default)]
    pub x_axis: XAxisOptions,
    #[serde(default = "default_y_axes")]
    pub y_axis: Vec<YAxisOptions>,
    #[serde(default)]
    pub series: SeriesGlobalOptions,
    #[serde(default)]
    pub series_options: IndexMap<String, SeriesOptions>,
    #[serde(default)]
    pub column_mapping: IndexMap<String, ColumnRole>,
    #[serde(default = "default_constant_lines")]
    pub constant_line: Vec<ReferenceLine>,
    #[serde(default = "default_constant_line_limit")]
    pub constant_line_limit: usize,
    #[serde(default)]
    pub show_data_labels: Option<bool>,
    #[serde(default = "default_number_format")]
    pub number_format: String,
    #[serde(default = "default_percent_format")]
    pub percent_format: String,
    #[serde(default = "default_date_time_format")]
    pub date_time_format: String,
    #[serde(default)]
    pub text_format: String,
    #[serde(default)]
    pub show_total_labels: bool,
    #[serde(default = "default_number_format")]
    pub total_number_format: String,
    #[serde(default = "default_true")]
    pub missing_values_as_zero: bool,
    #[serde(default)]
    pub marker_size: Option<u32>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            global_series_type: ChartKind::Column,
            sort_x: true,
            reverse_x: false,
            legend: LegendOptions::default(),
            x_axis: XAxisOptions::default(),
            y_axis: default_y_axes(),
            series: SeriesGlobalOptions::default(),
            series_options: IndexMap::new(),
            column_mapping: IndexMap::new(),
            constant_line: default_constant_lines(),
            constant_line_limit: DEFAULT_CONSTANT_LINE_LIMIT,
            show_data_labels: None,
            number_format: default_number_format(),
            percent_format: default_percent_format(),
            date_time_format: default_date_time_format(),
            text_format: String::new(),
            show_total_labels: false,
            total_number_format: default_number_format(),
            missing_values_as_zero: true,
            marker_size: None,
            extra: serde_json::Map::new(),
        }
    }
}

impl ChartOptions {
    #[must_use]
    pub fn new(kind: ChartKind) -> Self {
        Self {
            global_series_type: kind,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_stacking(mut self, stacking: Option<StackingMode>) -> Self {
        self.series.stacking = stacking;
        self
    }

    #[must_use]
    pub fn with_percent_values(mut self, percent_values: bool) -> Self {
        self.series.percent_values = percent_values;
        self
    }

    #[must_use]
    pub fn with_sort_x(mut self, sort_x: bool) -> Self {
        self.sort_x = sort_x;
        self
    }

    #[must_use]
    pub fn with_missing_values_as_zero(mut self, missing_values_as_zero: bool) -> Self {
        self.missing_values_as_zero = missing_values_as_zero;
        self
    }

    #[must_use]
    pub fn with_x_axis_type(mut self, axis_type: AxisType) -> Self {
        self.x_axis.axis_type = axis_type;
        self
    }

    #[must_use]
    pub fn with_date_time_format(mut self, format: impl Into<String>) -> Self {
        self.date_time_format = format.into();
        self
    }

    #[must_use]
    pub fn with_text_format(mut self, format: impl Into<String>) -> Self {
        self.text_format = format.into();
        self
    }

    #[must_use]
    pub fn with_show_total_labels(mut self, show: bool) -> Self {
        self.show_total_labels = show;
        self
    }

    #[must_use]
    pub fn with_total_number_format(mut self, format: impl Into<String>) -> Self {
        self.total_number_format = format.into();
        self
    }

    #[must_use]
    pub fn with_series_options(mut self, name: impl Into<String>, options: SeriesOptions) -> Self {
        self.series_options.insert(name.into(), options);
        self
    }

    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>, role: ColumnRole) -> Self {
        self.column_mapping.insert(column.into(), role);
        self
    }

    #[must_use]
    pub fn with_reference_lines(mut self, lines: Vec<ReferenceLine>) -> Self {
        self.constant_line = lines;
        self
    }

    /// Serializes options to pretty JSON.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidOptions(format!("failed to serialize options: {e}")))
    }

    /// Parses a (possibly partial) options object from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidOptions(format!("failed to parse options: {e}")))
    }

    pub fn from_json_value(value: serde_json::Value) -> ChartResult<Self> {
        serde_json::from_value(value)
            .map_err(|e| ChartError::InvalidOptions(format!("failed to parse options: {e}")))
    }

    /// Fills derived defaults and applies backward-compatibility rewrites.
    #[must_use]
    pub fn resolve(mut self) -> ResolvedOptions {
        match self.series.stacking {
            Some(StackingMode::Normal) => {
                self.series.stacking = Some(StackingMode::Stack);
                self.series.percent_values = false;
            }
            Some(StackingMode::Percent) => {
                self.series.stacking = Some(StackingMode::Stack);
                self.series.percent_values = true;
            }
            Some(StackingMode::Stack) | None => {}
        }

        let defaults = default_y_axes();
        for axis in defaults.into_iter().skip(self.y_axis.len()) {
            self.y_axis.push(axis);
        }

        let is_pie = self.global_series_type == ChartKind::Pie;
        let show_data_labels = self.show_data_labels.unwrap_or(is_pie);
        self.show_data_labels = Some(show_data_labels);
        if self.global_series_type == ChartKind::Line {
            self.marker_size = Some(LINE_MARKER_SIZE);
        }
        debug!(
            kind = ?self.global_series_type,
            stacking = ?self.series.stacking,
            percent_values = self.series.percent_values,
            "resolved chart options"
        );
        ResolvedOptions {
            options: self,
            show_data_labels,
        }
    }
}

/// Options after [`ChartOptions::resolve`]; every field read downstream is set.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptions {
    options: ChartOptions,
    show_data_labels: bool,
}

impl ResolvedOptions {
    /// Parses and resolves a JSON options object in one step.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        ChartOptions::from_json_str(input).map(ChartOptions::resolve)
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.options.global_series_type
    }

    #[must_use]
    pub fn show_data_labels(&self) -> bool {
        self.show_data_labels
    }

    #[must_use]
    pub fn is_stacked(&self) -> bool {
        self.options.series.stacking.is_some()
    }

    #[must_use]
    pub fn percent_values(&self) -> bool {
        self.options.series.percent_values
    }

    /// Value imputed for a missing Y.
    #[must_use]
    pub fn default_y(&self) -> Option<f64> {
        self.options.missing_values_as_zero.then_some(0.0)
    }

    #[must_use]
    pub fn y_axis(&self, secondary: bool) -> &YAxisOptions {
        &self.options.y_axis[usize::from(secondary)]
    }

    /// Series type after applying per-series overrides.
    #[must_use]
    pub fn series_kind(&self, name: &str) -> ChartKind {
        self.options
            .series_options
            .get(name)
            .and_then(|options| options.kind)
            .unwrap_or(self.options.global_series_type)
    }

    #[must_use]
    pub fn into_inner(self) -> ChartOptions {
        self.options
    }
}

impl Deref for ResolvedOptions {
    type Target = ChartOptions;

    fn deref(&self) -> &Self::Target {
        &self.options
    }
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        ChartOptions::default().resolve()
    }
}

fn default_true() -> bool {
    true
}

fn default_y_axes() -> Vec<YAxisOptions> {
    vec![YAxisOptions::default(), YAxisOptions::secondary()]
}

fn default_constant_lines() -> Vec<ReferenceLine> {
    vec![ReferenceLine::default()]
}

fn default_constant_line_limit() -> usize {
    DEFAULT_CONSTANT_LINE_LIMIT
}

fn default_number_format() -> String {
    DEFAULT_NUMBER_FORMAT.to_owned()
}

fn default_percent_format() -> String {
    DEFAULT_PERCENT_FORMAT.to_owned()
}

fn default_date_time_format() -> String {
    DEFAULT_DISPLAY_DATE_TIME_FORMAT.to_owned()
}
