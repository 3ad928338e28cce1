//! Error types for the bike sharing core library.

use chrono::NaiveDate;
use thiserror::Error;

/// The raw dataset column a code was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeField {
    Season,
    Weather,
    WorkingDay,
}

impl std::fmt::Display for CodeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CodeField::Season => "season",
            CodeField::Weather => "weathersit",
            CodeField::WorkingDay => "workingday",
        };
        f.write_str(name)
    }
}

/// Main error type for loading, filtering and summarizing rental records.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A raw code has no label in the fixed mapping.
    #[error("Unmapped {field} code: {code}")]
    UnmappedCode { field: CodeField, code: i64 },

    /// A filter date range whose start lies after its end.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// An extremes lookup was asked to scan zero records.
    #[error("Cannot locate extremes of an empty record set")]
    EmptyInput,

    /// Hour of day outside 0..=23.
    #[error("Hour out of range: {0}")]
    HourOutOfRange(i64),

    /// Rental counts are totals and can never be negative.
    #[error("Negative rental count: {0}")]
    NegativeCount(i64),

    /// Date parsing failed
    #[error("Failed to parse date: {0}")]
    InvalidDate(String),

    /// A data row failed validation; `line` is the 1-based CSV line.
    #[error("Invalid record on line {line}: {source}")]
    InvalidRow {
        line: u64,
        #[source]
        source: Box<DashboardError>,
    },

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to read the dataset
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Results using DashboardError
pub type Result<T> = std::result::Result<T, DashboardError>;
