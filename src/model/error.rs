use chrono::NaiveDate;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModelError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("band `{0}` is already registered")]
    DuplicateBand(String),

    #[error("unknown band: {0}")]
    UnknownBand(String),

    #[error(
        "invalid range for band `{band}`: [{lo}, {hi}] must satisfy {min} <= lo <= hi <= {max}"
    )]
    InvalidRange {
        band: String,
        lo: f64,
        hi: f64,
        min: f64,
        max: f64,
    },

    #[error("band `{band}` was given two different ranges in one update")]
    ConflictingRanges { band: String },

    #[error("invalid physical range for band `{band}`: min {min} exceeds max {max}")]
    InvalidPhysicalRange { band: String, min: f64, max: f64 },

    #[error("invalid temporal operator `{0}`: expected one of mean, min, max, median, mosaic")]
    InvalidTemporalOp(String),

    #[error("invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("invalid cloudy pixel percentage {0}: expected 0..=100")]
    InvalidCloudyPixelPct(u8),

    #[error("invalid band count {0}: visualization needs 1 (grayscale) or 3 (RGB) bands")]
    InvalidBandCount(usize),

    #[error("invalid bounds: {0}")]
    InvalidBounds(String),

    #[error("unknown basemap: {0}")]
    UnknownBasemap(String),
}
