pub mod aggregator;
pub mod chart_kind;
pub mod datetime_format;
pub mod normalize;
pub mod polymerize;
pub mod series;
pub mod types;
pub mod value;

pub use aggregator::{
    Aggregator, Count, PivotNumberFormat, RunningStat, StatMode, Sum, aggregator_by_name,
};
pub use chart_kind::{ChartKind, DataStrategy, LayoutStrategy};
pub use datetime_format::{
    DEFAULT_DISPLAY_DATE_TIME_FORMAT, DateTimePattern, MACHINE_DATE_TIME_FORMAT, parse_instant,
};
pub use normalize::{AxisType, normalize_value};
pub use polymerize::polymerize;
pub use series::{
    AxisRef, ErrorBars, RAW_ROW_KEY, Series, SourceData, SourceEntry, SourcePoint,
    TOTAL_SERIES_NAME, Visibility,
};
pub use types::ElementSize;
pub use value::{CellValue, Row, XKey, row_from_json};
