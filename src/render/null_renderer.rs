use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests can catch inconsistent series or
/// layout before a real plotting surface is attached.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub render_count: usize,
    pub last_series_count: usize,
    pub last_shape_count: usize,
    pub last_annotation_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.render_count += 1;
        self.last_series_count = frame.series.len();
        self.last_shape_count = frame.layout.shapes.len();
        self.last_annotation_count = frame.layout.annotations.len();
        Ok(())
    }
}
