use serde::{Deserialize, Serialize};

/// Measured size of the element the chart is drawn into, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementSize {
    pub width: f64,
    pub height: f64,
}

impl ElementSize {
    /// Smallest plot edge the renderer accepts.
    pub const MIN_EDGE_PX: u32 = 5;

    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Floors both edges to whole pixels, never below [`Self::MIN_EDGE_PX`].
    #[must_use]
    pub fn plot_size(self) -> (u32, u32) {
        (floor_edge(self.width), floor_edge(self.height))
    }
}

fn floor_edge(edge: f64) -> u32 {
    if !edge.is_finite() || edge <= f64::from(ElementSize::MIN_EDGE_PX) {
        return ElementSize::MIN_EDGE_PX;
    }
    edge.floor().min(f64::from(u32::MAX)) as u32
}
