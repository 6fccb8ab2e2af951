mod data_stage;
mod engine;
mod json_contract;
mod layout_composer;
mod options;
mod pie_layout;
mod reference_lines;
mod series_builder;
mod series_text;
mod total_series;

pub use data_stage::update_data;
pub use engine::ChartEngine;
pub use json_contract::ChartOptionsJsonContractV1;
pub use layout_composer::compose_layout;
pub use options::{
    AxisLabelOptions, AxisTitle, CHART_OPTIONS_SCHEMA_V1, ChartOptions, ColumnRole,
    DEFAULT_CONSTANT_LINE_LIMIT, DEFAULT_NUMBER_FORMAT, DEFAULT_PERCENT_FORMAT, LINE_MARKER_SIZE,
    LegendOptions, LineFormat, ReferenceAxis, ReferenceLine, ResolvedOptions, SeriesGlobalOptions,
    SeriesOptions, StackingMode, XAxisOptions, YAxisOptions,
};
pub use pie_layout::PieDimensions;
pub use reference_lines::{
    COLOR_PALETTE, add_reference_line, append_reference_lines, reference_line_annotation,
    reference_line_color, reference_line_shape, remove_reference_line,
};
pub use series_builder::{ColumnRoles, build_series};
pub use series_text::{
    NAME_FIELD, SIZE_FIELD, TextFormatter, TextItem, X_FIELD, Y_ERROR_FIELD, Y_FIELD,
    Y_PERCENT_FIELD, default_series_text,
};
pub use total_series::{build_total_series, total_series_enabled, total_values, upsert_total_series};
