/// Error types for the turfcast core.
use chrono::NaiveDate;
use thiserror::Error;

/// Main error type for turfcast operations.
#[derive(Error, Debug)]
pub enum TurfcastError {
    /// A raw provider row could not be interpreted
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// A raw hourly row had an unsupported field count
    #[error("Unsupported hourly row length {found} (expected {expected_observed} observed or {expected_forecast} forecast fields)")]
    RowLength {
        found: usize,
        expected_observed: usize,
        expected_forecast: usize,
    },

    /// Two series share no calendar date; recoverable (render "no data")
    #[error("No overlapping date between series starting {left} and {right}")]
    NoOverlap { left: NaiveDate, right: NaiveDate },

    /// A series required by a computation was empty
    #[error("Empty series: {0}")]
    EmptySeries(&'static str),

    /// A date was pushed out of chronological order or duplicated
    #[error("Date {date} breaks chronological ordering of series")]
    OutOfOrder { date: NaiveDate },

    /// Soil survey data was unusable; callers fall back to the default texture
    #[error("Soil texture classification failed: {0}")]
    TextureClassification(String),

    /// Date parsing failed
    #[error("Failed to parse date: {0}")]
    DateParse(String),
}

/// Type alias for Results using TurfcastError
pub type Result<T> = std::result::Result<T, TurfcastError>;
