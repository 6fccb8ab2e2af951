use indexmap::IndexMap;
use tracing::trace;

use crate::core::{AxisRef, ChartKind, Series, TOTAL_SERIES_NAME, Visibility, XKey};
use crate::format::NumberFormatter;

use super::{ResolvedOptions, StackingMode};

/// Total labels are drawn as a separate series only on stacked columns.
#[must_use]
pub fn total_series_enabled(options: &ResolvedOptions) -> bool {
    options.show_total_labels
        && options.kind() == ChartKind::Column
        && options.series.stacking == Some(StackingMode::Stack)
}

/// Per-X sum of Y over all visible, non-synthetic series, in first-seen order.
#[must_use]
pub fn total_values(series_list: &[Series]) -> IndexMap<XKey, f64> {
    let mut totals: IndexMap<XKey, f64> = IndexMap::new();
    for series in series_list
        .iter()
        .filter(|series| series.visible.is_visible() && !series.is_total())
    {
        for (key, entry) in &series.source_data {
            let sum: f64 = entry
                .points()
                .iter()
                .map(|point| point.y.unwrap_or(0.0))
                .sum();
            *totals.entry(key.clone()).or_insert(0.0) += sum;
        }
    }
    totals
}

/// Builds the label-only series carrying the formatted stacked totals.
///
/// Its bars have zero height and it is hidden from hover and the legend.
#[must_use]
pub fn build_total_series(series_list: &[Series], options: &ResolvedOptions) -> Series {
    let formatter = NumberFormatter::new(&options.total_number_format);
    let totals = total_values(series_list);

    let mut total = Series::new(TOTAL_SERIES_NAME)
        .with_kind(ChartKind::Column)
        .with_yaxis(AxisRef::Y)
        .with_visibility(Visibility::Visible);
    total.hoverinfo = Some("none".to_owned());
    total.textposition = Some("outside".to_owned());
    total.showlegend = Some(false);
    for (key, value) in totals {
        total.x.push(key);
        total.y.push(Some(0.0));
        total.text.push(formatter.format(value));
    }
    total
}

/// Replaces an existing total series in place, or appends a new one.
pub fn upsert_total_series(series_list: &mut Vec<Series>, options: &ResolvedOptions) {
    let total = build_total_series(series_list, options);
    trace!(positions = total.x.len(), "total series rebuilt");
    match series_list.iter().position(Series::is_total) {
        Some(index) => series_list[index] = total,
        None => series_list.push(total),
    }
}
