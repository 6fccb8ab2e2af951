use serde::{Deserialize, Serialize};

use crate::core::{ElementSize, Series};
use crate::error::{ChartError, ChartResult};
use crate::render::Layout;

/// Everything the plotting surface needs for one render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub series: Vec<Series>,
    pub layout: Layout,
}

impl RenderFrame {
    #[must_use]
    pub fn new(series: Vec<Series>, layout: Layout) -> Self {
        Self { series, layout }
    }

    pub fn validate(&self) -> ChartResult<()> {
        let min_edge = ElementSize::MIN_EDGE_PX;
        if self.layout.width < min_edge || self.layout.height < min_edge {
            return Err(ChartError::InvalidViewport {
                width: self.layout.width,
                height: self.layout.height,
            });
        }

        for series in self.series.iter().filter(|s| s.visible.is_visible()) {
            if !series.x.is_empty() && series.x.len() != series.y.len() {
                return Err(ChartError::InvalidData(format!(
                    "series `{}` has {} x values but {} y values",
                    series.name,
                    series.x.len(),
                    series.y.len()
                )));
            }
        }
        for shape in &self.layout.shapes {
            shape.validate()?;
        }
        for annotation in &self.layout.annotations {
            annotation.validate()?;
        }
        Ok(())
    }

    /// Serializes the frame in the renderer's JSON field naming.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize frame: {e}")))
    }
}
