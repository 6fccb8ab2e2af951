use std::borrow::Cow;

use crate::core::{AxisRef, ChartKind, Series, SourcePoint, XKey, normalize_value};
use crate::format::{NumberFormatter, TemplateFields, format_template};

use super::{ResolvedOptions, StackingMode};

pub const NAME_FIELD: &str = "@@name";
pub const X_FIELD: &str = "@@x";
pub const Y_FIELD: &str = "@@y";
pub const Y_ERROR_FIELD: &str = "@@yError";
pub const Y_PERCENT_FIELD: &str = "@@yPercent";
pub const SIZE_FIELD: &str = "@@size";

/// Label values for one data point, plus the unformatted Y used by total labels.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextItem {
    pub fields: TemplateFields,
    pub raw_y: Option<f64>,
}

impl TextItem {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Strategy used to turn a [`TextItem`] into the final label.
#[derive(Debug, Clone, PartialEq)]
pub enum TextFormatter {
    /// Raw per-point sum, for total labels on unstacked columns.
    RawTotal(NumberFormatter),
    Default,
    PieDefault,
    Template(String),
}

impl TextFormatter {
    #[must_use]
    pub fn from_options(options: &ResolvedOptions) -> Self {
        if options.show_total_labels
            && options.kind() == ChartKind::Column
            && options.series.stacking != Some(StackingMode::Stack)
        {
            return Self::RawTotal(NumberFormatter::new(&options.total_number_format));
        }
        if options.text_format.is_empty() {
            if options.kind() == ChartKind::Pie {
                Self::PieDefault
            } else {
                Self::Default
            }
        } else {
            Self::Template(options.text_format.clone())
        }
    }

    #[must_use]
    pub fn format(&self, item: &TextItem) -> String {
        match self {
            Self::RawTotal(formatter) => formatter.format_opt(item.raw_y),
            Self::Default => default_series_text(item),
            Self::PieDefault => format!(
                "{} ({})",
                item.field(Y_PERCENT_FIELD).unwrap_or_default(),
                item.field(Y_FIELD).unwrap_or_default()
            ),
            Self::Template(template) => format_template(template, &item.fields),
        }
    }
}

/// `y ± yError`, wrapped as `yPercent (…)` and suffixed with `: size` when
/// those fields exist.
#[must_use]
pub fn default_series_text(item: &TextItem) -> String {
    let mut result = item.field(Y_FIELD).unwrap_or_default().to_owned();
    if let Some(error) = item.field(Y_ERROR_FIELD) {
        result = format!("{result} \u{00B1} {error}");
    }
    if let Some(percent) = item.field(Y_PERCENT_FIELD) {
        result = format!("{percent} ({result})");
    }
    if let Some(size) = item.field(SIZE_FIELD) {
        result = format!("{result}: {size}");
    }
    result
}

/// Rebuilds `text` for each series, one label per plotted X.
///
/// Labels are derived from the original cells in `source_data`, re-normalized
/// with the user's display date/time format rather than the plotting format.
pub(crate) fn update_series_text(series_list: &mut [&mut Series], options: &ResolvedOptions) {
    let number = NumberFormatter::new(&options.number_format);
    let percent = NumberFormatter::new(&options.percent_format);
    let formatter = TextFormatter::from_options(options);
    let is_pie = options.kind() == ChartKind::Pie;
    let with_percent = options.percent_values() || is_pie;

    for series in series_list.iter_mut() {
        let free_form_y = series
            .kind
            .unwrap_or_else(|| options.series_kind(&series.name))
            .has_free_form_y();
        let positions: &[XKey] = if is_pie { &series.labels } else { &series.x };
        let mut texts = Vec::with_capacity(positions.len());
        for x in positions {
            let item = match series.source_data.get(x) {
                Some(entry) => entry.merged(),
                None => Cow::Owned(SourcePoint::new(x.clone(), options.default_y())),
            };
            let text = build_text_item(
                &series.name,
                series.yaxis,
                &item,
                free_form_y,
                with_percent,
                &number,
                &percent,
                options,
            );
            texts.push(formatter.format(&text));
        }
        series.text = texts;
    }
}

#[allow(clippy::too_many_arguments)]
fn build_text_item(
    name: &str,
    yaxis: AxisRef,
    item: &SourcePoint,
    free_form_y: bool,
    with_percent: bool,
    number: &NumberFormatter,
    percent: &NumberFormatter,
    options: &ResolvedOptions,
) -> TextItem {
    let mut text = TextItem::default();
    text.fields.insert(NAME_FIELD.to_owned(), name.to_owned());

    let x = normalize_value(
        &item.original_x(),
        Some(&options.x_axis.axis_type),
        &options.date_time_format,
    );
    text.fields.insert(X_FIELD.to_owned(), x.display_text());

    if free_form_y {
        let y_axis = options.y_axis(yaxis == AxisRef::Y2);
        let y = normalize_value(
            &item.original_y(),
            Some(&y_axis.axis_type),
            &options.date_time_format,
        );
        text.raw_y = y.as_f64();
        text.fields.insert(Y_FIELD.to_owned(), y.display_text());
    } else {
        text.raw_y = item.y;
        text.fields.insert(Y_FIELD.to_owned(), number.format_opt(item.y));
    }
    if let Some(error) = item.y_error {
        text.fields
            .insert(Y_ERROR_FIELD.to_owned(), number.format(error));
    }
    if let Some(size) = item.size {
        text.fields.insert(SIZE_FIELD.to_owned(), number.format(size));
    }
    if with_percent {
        // y_percent is on a 0..100 scale; percent patterns scale by 100 themselves.
        text.fields.insert(
            Y_PERCENT_FIELD.to_owned(),
            percent.format_opt(item.y_percent.map(|share| share.abs() / 100.0)),
        );
    }
    if let Some(raw) = item.raw_row() {
        for (key, value) in raw {
            text.fields.insert(key.clone(), value.display_text());
        }
    }
    text
}
