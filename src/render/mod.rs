mod frame;
mod layout;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use layout::{AxisLayout, Layout, LegendLayout, Margin};
pub use null_renderer::NullRenderer;
pub use primitives::{Annotation, Font, Shape, ShapeLine};

use crate::error::ChartResult;

/// Contract implemented by any plotting surface.
///
/// Surfaces receive the finished series list and layout, so drawing code stays
/// isolated from data preparation.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
