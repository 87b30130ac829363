use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid range: min={min}, max={max}")]
    InvalidRange { min: f64, max: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
