use crate::core::Series;
use crate::format::has_placeholder;
use crate::render::{Annotation, Layout};

use super::ResolvedOptions;
use super::series_text::NAME_FIELD;

const NAME_LABEL_DROP: f64 = 0.015;

/// Grid of cells, in paper coordinates, that hosts several pies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieDimensions {
    pub rows: usize,
    pub cells_in_row: usize,
    pub cell_width: f64,
    pub cell_height: f64,
    pub x_padding: f64,
    pub y_padding: f64,
}

impl PieDimensions {
    /// Up to two pies share one row; more pies wrap onto a second row.
    #[must_use]
    pub fn for_count(count: usize) -> Self {
        let rows = if count > 2 { 2 } else { 1 };
        let cells_in_row = count.div_ceil(rows).max(1);
        Self {
            rows,
            cells_in_row,
            cell_width: 1.0 / cells_in_row as f64,
            cell_height: 1.0 / rows as f64,
            x_padding: 0.02,
            y_padding: 0.1,
        }
    }

    /// Paper position of the name label under pie `index`.
    #[must_use]
    pub fn label_position(&self, index: usize) -> (f64, f64) {
        let x = (index % self.cells_in_row) as f64 * self.cell_width;
        let y = (index / self.cells_in_row) as f64 * self.cell_height;
        (
            x + (self.cell_width - self.x_padding) / 2.0,
            y + self.cell_height - NAME_LABEL_DROP,
        )
    }
}

/// Labels each pie with its series name, unless the slice template already
/// carries the name.
pub(crate) fn compose_pie_layout(mut layout: Layout, options: &ResolvedOptions, series: &[Series]) -> Layout {
    if has_placeholder(&options.text_format, NAME_FIELD) {
        layout.annotations.clear();
        return layout;
    }

    let dimensions = PieDimensions::for_count(series.len());
    layout.annotations = series
        .iter()
        .enumerate()
        .map(|(index, series)| {
            let (x, y) = dimensions.label_position(index);
            let mut annotation = Annotation::new(x, y, series.name.clone());
            annotation.xanchor = Some("center".to_owned());
            annotation.yanchor = Some("top".to_owned());
            annotation
        })
        .collect();
    layout
}
