use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace};

use crate::core::{DataStrategy, LayoutStrategy, Series, SourceEntry, XKey};

use super::ResolvedOptions;
use super::series_text::update_series_text;
use super::total_series::{total_series_enabled, upsert_total_series};

/// Recomputes the derived arrays of every visible series from `source_data`.
///
/// The buffer is owned by the caller and mutated in place so series identity
/// survives across renders. Only visible, non-synthetic series are touched;
/// the stacked-total series is appended or replaced afterwards when enabled.
/// The stage is a pure function of `source_data`, so repeated calls agree.
pub fn update_data<'a>(
    series_list: &'a mut Vec<Series>,
    options: &ResolvedOptions,
) -> &'a mut Vec<Series> {
    let strategy = options.kind().data_strategy();
    {
        let mut visible: Vec<&mut Series> = series_list
            .iter_mut()
            .filter(|series| series.visible.is_visible() && !series.is_total())
            .collect();
        debug!(
            kind = ?options.kind(),
            ?strategy,
            visible = visible.len(),
            "update series data"
        );

        if !visible.is_empty() {
            match strategy {
                DataStrategy::Pie => update_series_text(&mut visible, options),
                DataStrategy::LineArea => update_line_area_data(&mut visible, options),
                DataStrategy::Passthrough => {}
                DataStrategy::Default => update_default_data(&mut visible, options),
            }
        }
    }

    if total_series_enabled(options) {
        upsert_total_series(series_list, options);
    }
    series_list
}

fn uses_unified_x_axis(options: &ResolvedOptions) -> bool {
    options.sort_x && options.kind().layout_strategy() != LayoutStrategy::Box
}

fn update_line_area_data(series_list: &mut [&mut Series], options: &ResolvedOptions) {
    update_percent_values(series_list, options);
    if options.is_stacked() {
        update_unified_x_axis(series_list, options);
        stack_values(series_list, options);
    } else if uses_unified_x_axis(options) {
        update_unified_x_axis(series_list, options);
    }
    update_series_text(series_list, options);
}

fn update_default_data(series_list: &mut [&mut Series], options: &ResolvedOptions) {
    update_percent_values(series_list, options);
    if uses_unified_x_axis(options) {
        update_unified_x_axis(series_list, options);
    }
    update_series_text(series_list, options);
}

/// Replaces Y values with their share of the per-X absolute total.
///
/// Only series that have a given X contribute to its denominator. A missing
/// Y stays missing when `missing_values_as_zero` is off.
pub(crate) fn update_percent_values(series_list: &mut [&mut Series], options: &ResolvedOptions) {
    if !options.percent_values() {
        return;
    }

    let mut totals: IndexMap<XKey, f64> = IndexMap::new();
    for series in series_list.iter() {
        for entry in series.source_data.values() {
            for point in entry.points() {
                *totals.entry(point.x.clone()).or_insert(0.0) += point.y.unwrap_or(0.0).abs();
            }
        }
    }

    for series in series_list.iter_mut() {
        for entry in series.source_data.values_mut() {
            for point in entry.points_mut() {
                point.y_percent = match point.y {
                    None if !options.missing_values_as_zero => None,
                    y => {
                        let total = totals.get(&point.x).copied().unwrap_or(0.0);
                        (total != 0.0).then(|| y.unwrap_or(0.0) / total * 100.0)
                    }
                };
            }
        }

        let (x, y): (Vec<XKey>, Vec<Option<f64>>) = series
            .source_data
            .iter()
            .map(|(key, entry)| (key.clone(), entry.merged().y_percent))
            .unzip();
        series.x = x;
        series.y = y;
    }
    trace!(positions = totals.len(), "percent values updated");
}

/// Union of all X keys in first-seen order, optionally sorted ascending.
pub(crate) fn unified_x_values(series_list: &[&mut Series], sorted: bool) -> Vec<XKey> {
    let mut keys: IndexSet<XKey> = IndexSet::new();
    for series in series_list {
        keys.extend(series.source_data.keys().cloned());
    }
    let mut keys: Vec<XKey> = keys.into_iter().collect();
    if sorted {
        keys.sort();
    }
    keys
}

/// Rebuilds every series over the shared X domain, filling gaps with the
/// missing-value default.
pub(crate) fn update_unified_x_axis(series_list: &mut [&mut Series], options: &ResolvedOptions) {
    let unified = unified_x_values(series_list, options.sort_x);
    let default_y = options.default_y();
    let percent = options.percent_values();

    for series in series_list.iter_mut() {
        let mut x = Vec::with_capacity(unified.len());
        let mut y = Vec::with_capacity(unified.len());
        let mut errors = Vec::with_capacity(unified.len());
        for key in &unified {
            x.push(key.clone());
            match series.source_data.get(key) {
                Some(SourceEntry::Single(point)) => {
                    y.push(if percent { point.y_percent } else { point.y });
                    errors.push(point.y_error);
                }
                Some(SourceEntry::Multi(points)) => {
                    let total: f64 = points
                        .iter()
                        .map(|point| if percent { point.y_percent } else { point.y })
                        .map(|value| value.unwrap_or(0.0))
                        .sum();
                    y.push(Some(total));
                    errors.push(
                        points
                            .iter()
                            .filter_map(|point| point.y_error)
                            .reduce(|acc, value| acc + value),
                    );
                }
                None => {
                    y.push(default_y);
                    errors.push(None);
                }
            }
        }
        series.x = x;
        series.y = y;
        series.error_y.array = errors;
        series.text.clear();
    }
    trace!(positions = unified.len(), "unified x axis");
}

/// Turns each series' Y into the running total over the series before it.
pub(crate) fn stack_values(series_list: &mut [&mut Series], options: &ResolvedOptions) {
    let mut cumulative: IndexMap<XKey, f64> = IndexMap::new();
    for series in series_list.iter_mut() {
        let Series { x, y, .. } = &mut **series;
        for (key, value) in x.iter().zip(y.iter_mut()) {
            if value.is_none() && !options.missing_values_as_zero {
                continue;
            }
            let running = cumulative.entry(key.clone()).or_insert(0.0);
            *running += value.unwrap_or(0.0);
            *value = Some(*running);
        }
    }
}
