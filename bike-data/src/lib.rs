//! Filtering and summarizing of bike sharing rental records.
//!
//! This crate turns the raw records of a [`bike_core::RecordStore`] into the
//! structured summaries a dashboard renders. Data flow:
//!
//! 1. [`filter::apply_filter`] selects records by date range, season and
//!    day type, yielding a [`filter::FilteredView`] or an empty result.
//! 2. [`aggregation`] reduces the view into daily, season, day-type, hourly
//!    and weather summaries.
//! 3. [`extremes::locate_extremes`] finds the best and worst record.
//! 4. [`dashboard::render`] runs all of the above and returns a
//!    [`dashboard::ViewModel`].

pub mod aggregation;
pub mod dashboard;
pub mod extremes;
pub mod filter;
pub mod models;

pub use dashboard::{render, summarize, DashboardSummary, ViewModel};
pub use filter::{apply_filter, FilterOutcome, FilterParams, FilteredView};
