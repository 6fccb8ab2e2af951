use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Stroke of a layout shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeLine {
    pub color: String,
    pub width: f64,
    pub dash: String,
}

/// Straight line drawn over the plot area.
///
/// A `paper` reference on one axis makes the shape span the whole plot along
/// that axis (0..1) while the other axis uses data coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yref: Option<String>,
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
    pub line: ShapeLine,
}

impl Shape {
    /// Full-width line at data value `y`.
    #[must_use]
    pub fn horizontal(y: f64, line: ShapeLine) -> Self {
        Self {
            kind: "line".to_owned(),
            xref: Some("paper".to_owned()),
            yref: None,
            x0: 0.0,
            x1: 1.0,
            y0: y,
            y1: y,
            line,
        }
    }

    /// Full-height line at data value `x`.
    #[must_use]
    pub fn vertical(x: f64, line: ShapeLine) -> Self {
        Self {
            kind: "line".to_owned(),
            xref: None,
            yref: Some("paper".to_owned()),
            x0: x,
            x1: x,
            y0: 0.0,
            y1: 1.0,
            line,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if ![self.x0, self.x1, self.y0, self.y1].iter().all(|v| v.is_finite()) {
            return Err(ChartError::InvalidData(
                "shape coordinates must be finite".to_owned(),
            ));
        }
        if !self.line.width.is_finite() || self.line.width <= 0.0 {
            return Err(ChartError::InvalidData(
                "shape stroke width must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub size: f64,
    pub color: String,
}

/// Text placed on the plot, either in data or paper coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xanchor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yanchor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    pub text: String,
    pub showarrow: bool,
}

impl Annotation {
    #[must_use]
    pub fn new(x: f64, y: f64, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            xref: None,
            yref: None,
            xanchor: None,
            yanchor: None,
            align: None,
            font: None,
            text: text.into(),
            showarrow: false,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "annotation position must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}
