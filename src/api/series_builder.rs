use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::core::{
    AxisRef, CellValue, ChartKind, MACHINE_DATE_TIME_FORMAT, RAW_ROW_KEY, Row, Series, SourcePoint,
    XKey, normalize_value,
};

use super::{ColumnRole, ResolvedOptions};

/// Dataset columns grouped by the role the column mapping assigns them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRoles<'a> {
    pub x: Option<&'a str>,
    pub y: Vec<&'a str>,
    pub series: Option<&'a str>,
    pub y_error: Option<&'a str>,
    pub size: Option<&'a str>,
}

impl<'a> ColumnRoles<'a> {
    /// First column wins for single-valued roles; every `y` column is kept.
    #[must_use]
    pub fn from_mapping(mapping: &'a IndexMap<String, ColumnRole>) -> Self {
        let mut roles = Self::default();
        for (column, role) in mapping {
            let column = column.as_str();
            match role {
                ColumnRole::X => {
                    roles.x.get_or_insert(column);
                }
                ColumnRole::Y => roles.y.push(column),
                ColumnRole::Series => {
                    roles.series.get_or_insert(column);
                }
                ColumnRole::YError => {
                    roles.y_error.get_or_insert(column);
                }
                ColumnRole::Size => {
                    roles.size.get_or_insert(column);
                }
                ColumnRole::Unused => {}
            }
        }
        roles
    }
}

/// Groups dataset rows into series according to the column mapping.
///
/// X cells are normalized with the machine date/time format so temporal keys
/// sort chronologically; original cells stay on each point for labels.
/// Rows repeating an X within one series become a multi-row entry.
#[must_use]
pub fn build_series(rows: &[Row], options: &ResolvedOptions) -> Vec<Series> {
    let roles = ColumnRoles::from_mapping(&options.column_mapping);
    if roles.y.is_empty() {
        warn!(rows = rows.len(), "column mapping has no y column");
        return Vec::new();
    }

    let mut grouped: IndexMap<String, Series> = IndexMap::new();
    for row in rows {
        let x_cell = cell(row, roles.x);
        let x = XKey::from_cell(&normalize_value(
            &x_cell,
            Some(&options.x_axis.axis_type),
            MACHINE_DATE_TIME_FORMAT,
        ));
        let y_error = cell(row, roles.y_error);
        let size = cell(row, roles.size);

        for y_column in &roles.y {
            let y_cell = cell(row, Some(*y_column));
            let name = match roles.series.and_then(|column| row.get(column)) {
                Some(value) if !value.is_null() => value.display_text(),
                _ => (*y_column).to_owned(),
            };

            let mut point = SourcePoint::new(x.clone(), numeric(&y_cell));
            point.y_error = numeric(&y_error);
            point.size = numeric(&size);
            let mut original = Row::new();
            original.insert("x".to_owned(), x_cell.clone());
            original.insert("y".to_owned(), y_cell);
            if !y_error.is_null() {
                original.insert("yError".to_owned(), y_error.clone());
            }
            if !size.is_null() {
                original.insert("size".to_owned(), size.clone());
            }
            original.insert(RAW_ROW_KEY.to_owned(), CellValue::Object(row.clone()));

            grouped
                .entry(name.clone())
                .or_insert_with(|| Series::new(name))
                .push_point(point.with_row(original));
        }
    }

    let mut series_list: Vec<Series> = grouped
        .into_values()
        .map(|series| configure_series(series, options))
        .collect();
    series_list.sort_by_key(|series| z_index(series, options));
    for series in &mut series_list {
        if let Some(display) = options
            .series_options
            .get(&series.name)
            .and_then(|overrides| overrides.name.as_deref())
            .filter(|display| !display.is_empty())
        {
            series.name = display.to_owned();
        }
    }

    debug!(
        rows = rows.len(),
        series = series_list.len(),
        "built series from dataset"
    );
    series_list
}

fn cell(row: &Row, column: Option<&str>) -> CellValue {
    column
        .and_then(|column| row.get(column))
        .cloned()
        .unwrap_or_default()
}

/// Numbers pass through; finite numeric text is parsed; anything else is missing.
fn numeric(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::Number(number) => Some(*number),
        CellValue::Text(text) => text.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

fn z_index(series: &Series, options: &ResolvedOptions) -> i32 {
    options
        .series_options
        .get(&series.name)
        .map_or(0, |overrides| overrides.z_index)
}

fn configure_series(mut series: Series, options: &ResolvedOptions) -> Series {
    let kind = options.series_kind(&series.name);
    let on_secondary = options
        .series_options
        .get(&series.name)
        .is_some_and(|overrides| overrides.y_axis == 1);
    if on_secondary && (!options.is_stacked() || kind == ChartKind::Line) {
        series.yaxis = AxisRef::Y2;
    }
    series.kind = Some(kind);

    if kind == ChartKind::Pie {
        assign_pie_shares(&mut series);
    }
    series.rebuild_from_source();
    if kind == ChartKind::Pie {
        series.labels = series.x.clone();
    }
    series
}

/// Each slice's share of the series' absolute total, on a 0..100 scale.
fn assign_pie_shares(series: &mut Series) {
    let total: f64 = series
        .source_data
        .values()
        .flat_map(|entry| entry.points())
        .map(|point| point.y.unwrap_or(0.0).abs())
        .sum();
    for entry in series.source_data.values_mut() {
        for point in entry.points_mut() {
            point.y_percent = (total != 0.0).then(|| point.y.unwrap_or(0.0) / total * 100.0);
        }
    }
}
