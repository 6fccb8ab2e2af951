use serde::{Deserialize, Serialize};

use super::{Annotation, Shape};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub l: f64,
    pub r: f64,
    pub b: f64,
    pub t: f64,
    pub pad: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            l: 10.0,
            r: 10.0,
            b: 5.0,
            t: 20.0,
            pad: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendLayout {
    pub traceorder: String,
}

/// One axis of the output layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLayout {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub scale_type: String,
    pub automargin: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categoryorder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub showticklabels: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autorange: Option<bool>,
    /// `Some(None)` emits an explicit `null`, leaving the range to autorange.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<Option<[f64; 2]>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlaying: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
}

impl AxisLayout {
    #[must_use]
    pub fn new(title: Option<String>, scale_type: impl Into<String>) -> Self {
        Self {
            title,
            scale_type: scale_type.into(),
            automargin: true,
            categoryorder: None,
            showticklabels: None,
            autorange: None,
            range: None,
            overlaying: None,
            side: None,
        }
    }
}

/// Declarative layout consumed by the plotting surface.
///
/// Built fresh for every render; field names follow the renderer's contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub margin: Margin,
    pub width: u32,
    pub height: u32,
    pub autosize: bool,
    pub showlegend: bool,
    pub legend: LegendLayout,
    pub shapes: Vec<Shape>,
    pub annotations: Vec<Annotation>,
    pub hovermode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<AxisLayout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<AxisLayout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaxis2: Option<AxisLayout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barmode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boxmode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boxgroupgap: Option<f64>,
}
