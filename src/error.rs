use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid element size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid chart options: {0}")]
    InvalidOptions(String),

    #[error("unsupported aggregation mode: {0}")]
    UnsupportedAggregation(String),
}
