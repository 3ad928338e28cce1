//! Group-by reductions over a filtered view.
//!
//! Every summary is an independent pure function of the view. Output rows
//! are ordered by their group key, and argmax/argmin selection uses the same
//! first-chronological-occurrence rule as [`crate::extremes`], so the
//! results do not depend on visiting order.

use crate::extremes::ExtremeTracker;
use crate::filter::FilteredView;
use crate::models::{
    DailySummary, DayTypeSummary, HourlyPattern, HourlyPeak, SeasonSummary, WeatherComparison,
    WeatherHourRow,
};
use bike_core::{DayType, Season, Weather};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Weather situations included in the hourly weather comparison.
pub const COMPARED_WEATHER: [Weather; 2] = [Weather::Clear, Weather::Misty];

/// Sum and count accumulator for means.
#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    sum: u64,
    count: usize,
}

impl Tally {
    fn add(&mut self, value: u32) {
        self.sum += value as u64;
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        self.sum as f64 / self.count as f64
    }
}

/// Group by calendar date: sum, mean and max of the rental count.
pub fn daily_summary(view: &FilteredView) -> Vec<DailySummary> {
    let mut days: BTreeMap<NaiveDate, (Tally, u32)> = BTreeMap::new();
    for record in view.iter() {
        let (tally, max) = days.entry(record.date).or_default();
        tally.add(record.rental_count);
        *max = (*max).max(record.rental_count);
    }
    let rows: Vec<DailySummary> = days
        .into_iter()
        .map(|(date, (tally, max))| DailySummary {
            date,
            sum: tally.sum,
            mean: tally.mean(),
            max,
            count: tally.count,
        })
        .collect();
    log::debug!("[Bike Debug] aggregation: daily_summary returned {} rows", rows.len());
    rows
}

/// Group by season: highest and lowest rental count and where they occurred.
pub fn season_summary(view: &FilteredView) -> Vec<SeasonSummary> {
    let mut seasons: BTreeMap<Season, ExtremeTracker> = BTreeMap::new();
    for record in view.iter() {
        seasons
            .entry(record.season)
            .and_modify(|tracker| tracker.observe(record))
            .or_insert_with(|| ExtremeTracker::new(record));
    }
    let rows: Vec<SeasonSummary> = seasons
        .into_iter()
        .map(|(season, tracker)| SeasonSummary {
            season,
            max: tracker.max().rental_count,
            max_at: tracker.max().into(),
            min: tracker.min().rental_count,
            min_at: tracker.min().into(),
        })
        .collect();
    log::debug!("[Bike Debug] aggregation: season_summary returned {} rows", rows.len());
    rows
}

/// Group by day type: total, mean and count.
pub fn day_type_summary(view: &FilteredView) -> Vec<DayTypeSummary> {
    let mut groups: BTreeMap<DayType, Tally> = BTreeMap::new();
    for record in view.iter() {
        groups.entry(record.day_type).or_default().add(record.rental_count);
    }
    groups
        .into_iter()
        .map(|(day_type, tally)| DayTypeSummary {
            day_type,
            total: tally.sum,
            mean: tally.mean(),
            count: tally.count,
        })
        .collect()
}

/// Group by (hour, day type): mean rental count.
pub fn hourly_pattern(view: &FilteredView) -> Vec<HourlyPattern> {
    let mut groups: BTreeMap<(u8, DayType), Tally> = BTreeMap::new();
    for record in view.iter() {
        groups
            .entry((record.hour, record.day_type))
            .or_default()
            .add(record.rental_count);
    }
    groups
        .into_iter()
        .map(|((hour, day_type), tally)| HourlyPattern {
            hour,
            day_type,
            mean: tally.mean(),
        })
        .collect()
}

/// The hour with the highest mean for each day type in `pattern`. Ties keep
/// the earliest hour.
pub fn hourly_peaks(pattern: &[HourlyPattern]) -> Vec<HourlyPeak> {
    let mut peaks: BTreeMap<DayType, HourlyPeak> = BTreeMap::new();
    for row in pattern {
        let candidate = HourlyPeak {
            day_type: row.day_type,
            hour: row.hour,
            mean: row.mean,
        };
        peaks
            .entry(row.day_type)
            .and_modify(|peak| {
                if row.mean > peak.mean || (row.mean == peak.mean && row.hour < peak.hour) {
                    *peak = candidate.clone();
                }
            })
            .or_insert(candidate);
    }
    peaks.into_values().collect()
}

/// Mean rental count per (hour, weather) for Clear and Misty records only.
/// Cells without records are left out.
pub fn weather_comparison(view: &FilteredView) -> Vec<WeatherComparison> {
    let mut groups: BTreeMap<(u8, Weather), Tally> = BTreeMap::new();
    for record in view.iter().filter(|r| COMPARED_WEATHER.contains(&r.weather)) {
        groups
            .entry((record.hour, record.weather))
            .or_default()
            .add(record.rental_count);
    }
    let rows: Vec<WeatherComparison> = groups
        .into_iter()
        .map(|((hour, weather), tally)| WeatherComparison {
            hour,
            weather,
            mean: tally.mean(),
        })
        .collect();
    log::debug!(
        "[Bike Debug] aggregation: weather_comparison returned {} cells",
        rows.len()
    );
    rows
}

/// Pivot weather comparison cells into one row per hour with a column per
/// compared weather situation. Hours with no cell at all are skipped.
pub fn weather_by_hour(cells: &[WeatherComparison]) -> Vec<WeatherHourRow> {
    let mut hours: BTreeMap<u8, WeatherHourRow> = BTreeMap::new();
    for cell in cells {
        let row = hours.entry(cell.hour).or_insert(WeatherHourRow {
            hour: cell.hour,
            clear: None,
            misty: None,
        });
        match cell.weather {
            Weather::Clear => row.clear = Some(cell.mean),
            Weather::Misty => row.misty = Some(cell.mean),
            _ => {}
        }
    }
    hours.into_values().collect()
}
