use tracing::debug;

use crate::core::{AxisRef, AxisType, ElementSize, LayoutStrategy, Series};
use crate::render::{AxisLayout, Layout, LegendLayout, Margin};

use super::pie_layout::compose_pie_layout;
use super::reference_lines::append_reference_lines;
use super::{AxisTitle, ResolvedOptions, XAxisOptions, YAxisOptions};

const BOX_GROUP_GAP: f64 = 0.5;
const HOVER_MODE: &str = "x unified";

/// Builds the layout for one render from the element size, options and the
/// prepared series.
#[must_use]
pub fn compose_layout(size: ElementSize, options: &ResolvedOptions, series: &[Series]) -> Layout {
    let (width, height) = size.plot_size();
    let layout = Layout {
        margin: Margin::default(),
        width,
        height,
        autosize: false,
        showlegend: options.legend.enabled,
        legend: LegendLayout {
            traceorder: options.legend.traceorder.clone(),
        },
        shapes: Vec::new(),
        annotations: Vec::new(),
        hovermode: HOVER_MODE.to_owned(),
        xaxis: None,
        yaxis: None,
        yaxis2: None,
        barmode: None,
        boxmode: None,
        boxgroupgap: None,
    };

    let strategy = options.kind().layout_strategy();
    debug!(width, height, ?strategy, series = series.len(), "compose layout");
    match strategy {
        LayoutStrategy::Pie => compose_pie_layout(layout, options, series),
        LayoutStrategy::Box => compose_box_layout(layout, options, series),
        LayoutStrategy::Default => compose_default_layout(layout, options, series),
    }
}

fn axis_title(title: Option<&AxisTitle>) -> Option<String> {
    title.and_then(|title| title.text.clone())
}

pub(crate) fn x_axis_layout(axis: &XAxisOptions, sort_x: bool, reverse_x: bool) -> AxisLayout {
    let mut layout = AxisLayout::new(axis_title(axis.title.as_ref()), axis.axis_type.scale_type());
    if sort_x && layout.scale_type == AxisType::Category.scale_type() {
        layout.categoryorder = Some(
            if reverse_x {
                "category descending"
            } else {
                "category ascending"
            }
            .to_owned(),
        );
    }
    layout.showticklabels = axis.labels.as_ref().map(|labels| labels.enabled);
    layout
}

pub(crate) fn y_axis_layout(axis: &YAxisOptions) -> AxisLayout {
    let mut layout = AxisLayout::new(axis_title(axis.title.as_ref()), axis.axis_type.scale_type());
    layout.autorange = Some(true);
    layout.range = Some(None);
    layout
}

fn compose_default_layout(mut layout: Layout, options: &ResolvedOptions, series: &[Series]) -> Layout {
    layout.xaxis = Some(x_axis_layout(&options.x_axis, options.sort_x, options.reverse_x));
    layout.yaxis = Some(y_axis_layout(options.y_axis(false)));

    if series.iter().any(|series| series.yaxis == AxisRef::Y2) {
        let mut secondary = y_axis_layout(options.y_axis(true));
        secondary.overlaying = Some("y".to_owned());
        secondary.side = Some("right".to_owned());
        layout.yaxis2 = Some(secondary);
    }

    if options.is_stacked() {
        layout.barmode = Some("relative".to_owned());
    }

    append_reference_lines(&mut layout, &options.constant_line);
    layout
}

fn compose_box_layout(layout: Layout, options: &ResolvedOptions, series: &[Series]) -> Layout {
    let mut layout = compose_default_layout(layout, options, series);
    layout.boxmode = Some("group".to_owned());
    layout.boxgroupgap = Some(BOX_GROUP_GAP);
    layout
}
