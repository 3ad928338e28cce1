//! One full recomputation of the dashboard for a set of filter parameters.
//!
//! The presentation layer calls [`render`] on every filter change; nothing
//! is cached between calls and the store is only read.

use crate::aggregation::{
    daily_summary, day_type_summary, hourly_pattern, hourly_peaks, season_summary,
    weather_comparison,
};
use crate::extremes::locate_extremes;
use crate::filter::{apply_filter, FilterOutcome, FilterParams, FilteredView};
use crate::models::{
    DailySummary, DashboardMetrics, DayTypeSummary, Extremes, HourlyPattern, HourlyPeak,
    SeasonSummary, WeatherComparison,
};
use bike_core::{DashboardError, RecordStore, Result};
use serde::Serialize;

/// Everything the dashboard shows for a non-empty view.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardSummary {
    pub filter: FilterParams,
    pub record_count: usize,
    pub metrics: DashboardMetrics,
    pub daily: Vec<DailySummary>,
    pub seasons: Vec<SeasonSummary>,
    pub day_types: Vec<DayTypeSummary>,
    pub hourly: Vec<HourlyPattern>,
    pub hourly_peaks: Vec<HourlyPeak>,
    pub weather: Vec<WeatherComparison>,
    pub extremes: Extremes,
}

/// The result handed to the presentation layer.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ViewModel {
    /// The filter matched no record; show a "no data" message.
    NoData { filter: FilterParams },
    Summary(Box<DashboardSummary>),
}

impl ViewModel {
    pub fn summary(&self) -> Option<&DashboardSummary> {
        match self {
            ViewModel::Summary(summary) => Some(summary),
            ViewModel::NoData { .. } => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, ViewModel::NoData { .. })
    }
}

impl DashboardMetrics {
    /// Headline figures from the daily summary. Fails with `EmptyInput` on
    /// an empty slice.
    pub fn from_daily(daily: &[DailySummary]) -> Result<Self> {
        let (first, rest) = daily.split_first().ok_or(DashboardError::EmptyInput)?;
        let busiest_day = rest.iter().fold(first, |best, day| {
            if day.sum > best.sum {
                day
            } else {
                best
            }
        });
        Ok(DashboardMetrics {
            total_rentals: daily.iter().map(|d| d.sum).sum(),
            average_daily_rentals: daily.iter().map(|d| d.mean).sum::<f64>() / daily.len() as f64,
            peak_rentals: daily.iter().map(|d| d.max).max().unwrap_or(0),
            busiest_day: busiest_day.clone(),
        })
    }
}

/// Compute every summary of a view.
pub fn summarize(view: &FilteredView) -> Result<DashboardSummary> {
    let daily = daily_summary(view);
    let metrics = DashboardMetrics::from_daily(&daily)?;
    let hourly = hourly_pattern(view);
    let peaks = hourly_peaks(&hourly);
    Ok(DashboardSummary {
        filter: view.params().clone(),
        record_count: view.len(),
        metrics,
        daily,
        seasons: season_summary(view),
        day_types: day_type_summary(view),
        hourly,
        hourly_peaks: peaks,
        weather: weather_comparison(view),
        extremes: locate_extremes(view.records())?,
    })
}

/// Filter the store and summarize the result. An empty result produces
/// [`ViewModel::NoData`] without running any aggregation.
pub fn render(store: &RecordStore, params: &FilterParams) -> Result<ViewModel> {
    match apply_filter(store, params) {
        FilterOutcome::EmptyResultSet => {
            log::info!("[Bike Debug] dashboard: filter matched no records");
            Ok(ViewModel::NoData {
                filter: params.clone(),
            })
        }
        FilterOutcome::Matched(view) => {
            let summary = summarize(&view)?;
            log::info!(
                "[Bike Debug] dashboard: summarized {} records over {} days",
                summary.record_count,
                summary.daily.len()
            );
            Ok(ViewModel::Summary(Box::new(summary)))
        }
    }
}
