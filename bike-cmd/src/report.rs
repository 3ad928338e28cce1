//! Plain-text rendering of the dashboard for the terminal.

use bike_core::{DateRange, Record, RecordStore};
use bike_data::{DashboardSummary, ViewModel};
use bike_utils::dates::{format_date, format_date_hour};
use bike_utils::numbers::{format_mean, format_thousands};
use std::fmt::Write;

pub const NO_DATA_MESSAGE: &str = "No data for the selected filters.";

fn describe_record(record: &Record) -> String {
    format!(
        "{} rentals on {} ({}, {}, {})",
        format_thousands(record.rental_count as u64),
        format_date_hour(&record.date, record.hour),
        record.season,
        record.weather,
        record.day_type
    )
}

fn describe_range(range: &DateRange) -> String {
    format!("{} to {}", format_date(&range.start()), format_date(&range.end()))
}

fn write_summary(out: &mut String, summary: &DashboardSummary) -> std::fmt::Result {
    let metrics = &summary.metrics;
    writeln!(out, "Bike Sharing Dashboard")?;
    let range = &summary.filter.date_range;
    writeln!(out, "Period: {} ({} days)", describe_range(range), range.num_days())?;
    writeln!(out, "Records: {}", format_thousands(summary.record_count as u64))?;
    writeln!(out)?;
    writeln!(out, "Total rentals:         {}", format_thousands(metrics.total_rentals))?;
    writeln!(
        out,
        "Average daily rentals: {}",
        format_mean(metrics.average_daily_rentals)
    )?;
    writeln!(out, "Peak rentals:          {}", format_thousands(metrics.peak_rentals as u64))?;
    writeln!(
        out,
        "Busiest day:           {} ({} rentals)",
        format_date(&metrics.busiest_day.date),
        format_thousands(metrics.busiest_day.sum)
    )?;

    writeln!(out)?;
    writeln!(out, "Seasons")?;
    for s in &summary.seasons {
        writeln!(
            out,
            "  {:<8} max {} at {}, min {} at {}",
            s.season.name(),
            format_thousands(s.max as u64),
            format_date_hour(&s.max_at.date, s.max_at.hour),
            format_thousands(s.min as u64),
            format_date_hour(&s.min_at.date, s.min_at.hour)
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Day types")?;
    for d in &summary.day_types {
        writeln!(
            out,
            "  {:<16} total {}, mean {}, records {}",
            d.day_type.name(),
            format_thousands(d.total),
            format_mean(d.mean),
            d.count
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Peak hours")?;
    for p in &summary.hourly_peaks {
        writeln!(
            out,
            "  {:<16} {:02}:00 (mean {})",
            p.day_type.name(),
            p.hour,
            format_mean(p.mean)
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Best record:  {}", describe_record(&summary.extremes.max))?;
    writeln!(out, "Worst record: {}", describe_record(&summary.extremes.min))?;
    Ok(())
}

/// Render the view model as a text report.
pub fn format_report(model: &ViewModel) -> String {
    let mut out = String::new();
    let written = match model {
        ViewModel::NoData { filter } => writeln!(
            out,
            "{} ({})",
            NO_DATA_MESSAGE,
            describe_range(&filter.date_range)
        ),
        ViewModel::Summary(summary) => write_summary(&mut out, summary),
    };
    // Writing into a String cannot fail.
    debug_assert!(written.is_ok());
    out
}

/// Render the dataset's date span, e.g. for choosing filter flags.
pub fn format_bounds(store: &RecordStore) -> String {
    match store.date_bounds() {
        Some(range) => format!(
            "{} records ({} rentals) from {}",
            format_thousands(store.len() as u64),
            format_thousands(store.total_rentals()),
            describe_range(&range)
        ),
        None => "Dataset contains no valid records.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bike_core::LoadPolicy;
    use bike_data::{render, FilterParams};
    use chrono::NaiveDate;

    const SAMPLE_HOURLY_CSV: &str = include_str!("../../fixtures/hourly_sample.csv");

    fn sample_store() -> RecordStore {
        RecordStore::from_csv_str(SAMPLE_HOURLY_CSV, LoadPolicy::Strict).unwrap()
    }

    #[test]
    fn test_report_lists_headline_figures() {
        let store = sample_store();
        let params = FilterParams::for_store(&store).unwrap();
        let report = format_report(&render(&store, &params).unwrap());

        assert!(report.contains("Period: 2011-01-01 to 2011-10-17 (290 days)"));
        assert!(report.contains("Total rentals:         3,147"));
        assert!(report.contains("Busiest day:           2011-06-01 (1,232 rentals)"));
        assert!(report.contains("Weekday          17:00 (mean 356.00)"));
        assert!(report.contains("Best record:  512 rentals on 2011-06-01 17:00"));
        assert!(report.contains("Worst record: 3 rentals on 2011-01-01 08:00"));
        assert!(!report.contains("Fall"));
    }

    #[test]
    fn test_report_shows_no_data_message() {
        let store = sample_store();
        let start = NaiveDate::from_ymd_opt(2012, 1, 1).unwrap();
        let params = FilterParams::new(start, start).unwrap();
        let report = format_report(&render(&store, &params).unwrap());
        assert_eq!(
            report,
            "No data for the selected filters. (2012-01-01 to 2012-01-01)\n"
        );
    }

    #[test]
    fn test_bounds_text() {
        let store = sample_store();
        assert_eq!(
            format_bounds(&store),
            "16 records (3,147 rentals) from 2011-01-01 to 2011-10-17"
        );
        assert_eq!(
            format_bounds(&RecordStore::default()),
            "Dataset contains no valid records."
        );
    }
}
