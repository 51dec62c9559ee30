use thiserror::Error;

use crate::core::Orientation;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid geometry size: width={width}, height={height}")]
    InvalidGeometry { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid logarithm base: {0} (must be finite, > 0 and != 1)")]
    InvalidLogBase(f64),

    #[error("unknown series id: {0}")]
    UnknownSeries(u32),

    #[error("unknown axis id: {0}")]
    UnknownAxis(u32),

    #[error("series {series} already has a {orientation:?} axis attached (axis {existing})")]
    AxisOrientationTaken {
        series: u32,
        orientation: Orientation,
        existing: u32,
    },
}
