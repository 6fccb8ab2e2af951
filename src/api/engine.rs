use tracing::{debug, info};

use crate::core::{ElementSize, Row, Series};
use crate::error::ChartResult;
use crate::render::{Layout, RenderFrame, Renderer};

use super::layout_composer::compose_layout;
use super::series_builder::build_series;
use super::{ChartOptions, ResolvedOptions, update_data};

/// Main facade consumed by host applications.
///
/// Options are resolved once, at construction or on [`ChartEngine::set_options`].
/// The series buffer stays owned by the caller so trace identity survives
/// across renders.
pub struct ChartEngine<R: Renderer> {
    renderer: R,
    options: ResolvedOptions,
}

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn new(renderer: R, options: ChartOptions) -> Self {
        let options = options.resolve();
        info!(kind = ?options.kind(), "chart engine initialized");
        Self { renderer, options }
    }

    #[must_use]
    pub fn options(&self) -> &ResolvedOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: ChartOptions) {
        self.options = options.resolve();
    }

    /// Builds series from dataset rows and runs the data stage on them.
    #[must_use]
    pub fn prepare(&self, rows: &[Row]) -> Vec<Series> {
        let mut series = build_series(rows, &self.options);
        update_data(&mut series, &self.options);
        series
    }

    /// Recomputes derived series arrays in place.
    pub fn update_data<'a>(&self, series: &'a mut Vec<Series>) -> &'a mut Vec<Series> {
        update_data(series, &self.options)
    }

    #[must_use]
    pub fn layout(&self, size: ElementSize, series: &[Series]) -> Layout {
        compose_layout(size, &self.options, series)
    }

    /// Runs the data stage, composes the layout and hands both to the renderer.
    pub fn render(&mut self, size: ElementSize, series: &mut Vec<Series>) -> ChartResult<()> {
        update_data(series, &self.options);
        let layout = compose_layout(size, &self.options, series);
        let frame = RenderFrame::new(series.clone(), layout);
        debug!(
            series = frame.series.len(),
            shapes = frame.layout.shapes.len(),
            "render frame"
        );
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
