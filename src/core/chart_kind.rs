use serde::{Deserialize, Serialize};

/// Chart (or per-series) type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    #[serde(alias = "bar")]
    Column,
    Line,
    Area,
    Pie,
    Scatter,
    Bubble,
    Box,
    Heatmap,
    Custom,
    #[serde(other)]
    Other,
}

/// How the data stage treats a chart kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataStrategy {
    /// Text labels only.
    Pie,
    /// Percent values, unified X and cumulative stacking.
    LineArea,
    /// Left untouched.
    Passthrough,
    /// Percent values and unified X; bars stack in the renderer.
    Default,
}

/// How the layout composer treats a chart kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutStrategy {
    Pie,
    Box,
    Default,
}

impl ChartKind {
    #[must_use]
    pub fn data_strategy(self) -> DataStrategy {
        match self {
            Self::Pie => DataStrategy::Pie,
            Self::Line | Self::Area => DataStrategy::LineArea,
            Self::Heatmap => DataStrategy::Passthrough,
            Self::Column
            | Self::Scatter
            | Self::Bubble
            | Self::Box
            | Self::Custom
            | Self::Other => DataStrategy::Default,
        }
    }

    #[must_use]
    pub fn layout_strategy(self) -> LayoutStrategy {
        match self {
            Self::Pie => LayoutStrategy::Pie,
            Self::Box => LayoutStrategy::Box,
            _ => LayoutStrategy::Default,
        }
    }

    /// Trace type emitted to the plotting surface; columns are drawn as bars.
    #[must_use]
    pub fn trace_type(self) -> &'static str {
        match self {
            Self::Column => "bar",
            Self::Line => "line",
            Self::Area => "area",
            Self::Pie => "pie",
            Self::Scatter => "scatter",
            Self::Bubble => "bubble",
            Self::Box => "box",
            Self::Heatmap => "heatmap",
            Self::Custom => "custom",
            Self::Other => "other",
        }
    }

    /// Kinds whose Y values are arbitrary cells rather than numbers.
    #[must_use]
    pub fn has_free_form_y(self) -> bool {
        matches!(self, Self::Scatter | Self::Bubble)
    }
}
