use tracing::{debug, trace};

use crate::render::{Annotation, Font, Layout, Shape, ShapeLine};

use super::{ChartOptions, LineFormat, ReferenceAxis, ReferenceLine};

/// Colors assigned to reference lines without an explicit color, by index.
pub const COLOR_PALETTE: [&str; 14] = [
    "#356AFF", "#E92828", "#3BD973", "#604FE9", "#50F5ED", "#FB8D3D", "#799CFF", "#B554FF",
    "#8CFFB4", "#A55F2A", "#000000", "#494949", "#FF7DE3", "#002FB4",
];

const LABEL_FONT_SIZE: f64 = 13.0;

impl LineFormat {
    /// Stroke width and dash pattern.
    #[must_use]
    pub fn stroke(self) -> (f64, &'static str) {
        match self {
            Self::Solid => (2.0, "solid"),
            Self::BoldSolid => (4.0, "solid"),
            Self::Dotted => (2.0, "dot"),
        }
    }
}

#[must_use]
pub fn reference_line_color(line: &ReferenceLine, index: usize) -> String {
    if line.color.is_empty() {
        COLOR_PALETTE[index % COLOR_PALETTE.len()].to_owned()
    } else {
        line.color.clone()
    }
}

/// Shape for a configured line; `None` while the line has no numeric value.
#[must_use]
pub fn reference_line_shape(line: &ReferenceLine, index: usize) -> Option<Shape> {
    let value = line.value.filter(|value| value.is_finite())?;
    let (width, dash) = line.format.stroke();
    let stroke = ShapeLine {
        color: reference_line_color(line, index),
        width,
        dash: dash.to_owned(),
    };
    Some(match line.reference {
        ReferenceAxis::X => Shape::horizontal(value, stroke),
        ReferenceAxis::Y => Shape::vertical(value, stroke),
    })
}

/// Name label anchored at the far end of the line, in the line's color.
#[must_use]
pub fn reference_line_annotation(line: &ReferenceLine, index: usize) -> Option<Annotation> {
    let value = line.value.filter(|value| value.is_finite())?;
    let mut annotation = match line.reference {
        ReferenceAxis::X => {
            let mut annotation = Annotation::new(1.0, value, line.name.clone());
            annotation.xref = Some("paper".to_owned());
            annotation
        }
        ReferenceAxis::Y => {
            let mut annotation = Annotation::new(value, 1.0, line.name.clone());
            annotation.yref = Some("paper".to_owned());
            annotation
        }
    };
    annotation.font = Some(Font {
        size: LABEL_FONT_SIZE,
        color: reference_line_color(line, index),
    });
    annotation.align = Some("center".to_owned());
    annotation.xanchor = Some("left".to_owned());
    Some(annotation)
}

/// Appends one shape and one annotation per configured line.
pub fn append_reference_lines(layout: &mut Layout, lines: &[ReferenceLine]) {
    let mut skipped = 0usize;
    for (index, line) in lines.iter().enumerate() {
        match (
            reference_line_shape(line, index),
            reference_line_annotation(line, index),
        ) {
            (Some(shape), Some(annotation)) => {
                layout.shapes.push(shape);
                layout.annotations.push(annotation);
            }
            _ => skipped += 1,
        }
    }
    trace!(
        drawn = lines.len() - skipped,
        skipped, "reference lines appended"
    );
}

/// Adds a line unless the configured limit is reached. Returns whether it was added.
pub fn add_reference_line(options: &mut ChartOptions, line: ReferenceLine) -> bool {
    if options.constant_line.len() >= options.constant_line_limit {
        debug!(
            limit = options.constant_line_limit,
            "reference line limit reached"
        );
        return false;
    }
    options.constant_line.push(line);
    true
}

/// Removes the line at `index`; the last remaining line is never removed.
pub fn remove_reference_line(options: &mut ChartOptions, index: usize) -> Option<ReferenceLine> {
    if options.constant_line.len() <= 1 || index >= options.constant_line.len() {
        return None;
    }
    Some(options.constant_line.remove(index))
}
