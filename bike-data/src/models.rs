//! Summary row structs produced by the aggregation pipeline.
//!
//! All structs derive `Serialize` so the presentation layer can consume them
//! as JSON or CSV rows. None of them carries formatting or styling.

use bike_core::{DayType, Record, Season, Weather};
use chrono::NaiveDate;
use serde::Serialize;

/// Identifies the record that produced an extreme value.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct RecordIdentity {
    pub date: NaiveDate,
    pub hour: u8,
}

impl From<&Record> for RecordIdentity {
    fn from(record: &Record) -> Self {
        RecordIdentity {
            date: record.date,
            hour: record.hour,
        }
    }
}

/// Rentals of one calendar date.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub sum: u64,
    /// Arithmetic mean over the records of that date.
    pub mean: f64,
    pub max: u32,
    /// Number of records (hours) observed on that date.
    pub count: usize,
}

/// Highest and lowest rental count of one season, with the record that
/// achieved each.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeasonSummary {
    pub season: Season,
    pub max: u32,
    pub max_at: RecordIdentity,
    pub min: u32,
    pub min_at: RecordIdentity,
}

/// Rentals split by weekday vs weekend/holiday.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DayTypeSummary {
    pub day_type: DayType,
    pub total: u64,
    pub mean: f64,
    pub count: usize,
}

/// Mean rentals for one hour of day within one day type.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HourlyPattern {
    pub hour: u8,
    pub day_type: DayType,
    pub mean: f64,
}

/// The busiest hour of a day type, read off the hourly pattern.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HourlyPeak {
    pub day_type: DayType,
    pub hour: u8,
    pub mean: f64,
}

/// Mean rentals for one hour of day under one weather situation.
///
/// Only Clear and Misty are compared. An hour with no record for a weather
/// situation has no row for it; absence means "no data", not zero.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeatherComparison {
    pub hour: u8,
    pub weather: Weather,
    pub mean: f64,
}

/// One hour of the weather comparison pivoted into columns.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeatherHourRow {
    pub hour: u8,
    pub clear: Option<f64>,
    pub misty: Option<f64>,
}

/// The single best and single worst record of a view.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Extremes {
    pub max: Record,
    pub min: Record,
}

/// Headline figures of the dashboard.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardMetrics {
    /// Sum of all rentals in the view.
    pub total_rentals: u64,
    /// Mean of the per-date means.
    pub average_daily_rentals: f64,
    /// Largest single record count in the view.
    pub peak_rentals: u32,
    /// The date with the largest daily sum (earliest date on ties).
    pub busiest_day: DailySummary,
}
