//! Shared command-line arguments: the dataset to load and the filter to apply.

use anyhow::Context;
use bike_core::{DateRange, DayType, LoadPolicy, RecordStore, Season};
use bike_data::FilterParams;
use bike_utils::dates::parse_date;
use chrono::NaiveDate;
use clap::Args;
use log::{info, warn};
use std::path::{Path, PathBuf};

#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Path to the hourly (or daily) rentals CSV, optionally gzip-compressed
    #[arg(short = 'd', long)]
    pub data: PathBuf,

    /// Abort on the first invalid row instead of skipping it
    #[arg(long)]
    pub strict: bool,
}

impl DataArgs {
    pub fn policy(&self) -> LoadPolicy {
        if self.strict {
            LoadPolicy::Strict
        } else {
            LoadPolicy::SkipInvalid
        }
    }

    /// Load the dataset, logging how many rows were skipped.
    pub fn load(&self) -> anyhow::Result<RecordStore> {
        let store = RecordStore::open(&self.data, self.policy())
            .with_context(|| format!("Failed to load dataset {}", self.data.display()))?;
        if store.skipped_rows() > 0 {
            warn!(
                "[Bike Debug] cmd: skipped {} invalid rows in {}",
                store.skipped_rows(),
                self.data.display()
            );
        }
        info!(
            "[Bike Debug] cmd: loaded {} records from {}",
            store.len(),
            self.data.display()
        );
        Ok(store)
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// First date to include (YYYY-MM-DD); defaults to the dataset's first date
    #[arg(long, value_parser = parse_date)]
    pub start: Option<NaiveDate>,

    /// Last date to include (YYYY-MM-DD); defaults to the dataset's last date
    #[arg(long, value_parser = parse_date)]
    pub end: Option<NaiveDate>,

    /// Season to include (Spring, Summer, Fall, Winter); repeatable, defaults to all
    #[arg(long = "season")]
    pub seasons: Vec<Season>,

    /// Day type to include (weekday, weekend-or-holiday); repeatable, defaults to all
    #[arg(long = "day-type")]
    pub day_types: Vec<DayType>,

    /// JSON file with filter parameters; flags given alongside it override its fields
    #[arg(long)]
    pub filter_file: Option<PathBuf>,
}

/// Read filter parameters from a JSON file.
pub fn read_filter_file(path: &Path) -> anyhow::Result<FilterParams> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read filter file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse filter file {}", path.display()))
}

impl FilterArgs {
    /// Build the filter to apply to `store`.
    ///
    /// Starts from the filter file when one is given, otherwise from the
    /// dataset's full span with everything allowed, then applies the flags.
    pub fn resolve(&self, store: &RecordStore) -> anyhow::Result<FilterParams> {
        let base = match &self.filter_file {
            Some(path) => read_filter_file(path)?,
            None => FilterParams::for_store(store)
                .context("Dataset contains no valid records")?,
        };

        let start = self.start.unwrap_or(base.date_range.start());
        let end = self.end.unwrap_or(base.date_range.end());
        let mut params = FilterParams {
            date_range: DateRange::new(start, end)?,
            ..base
        };
        if !self.seasons.is_empty() {
            params = params.with_seasons(self.seasons.iter().copied());
        }
        if !self.day_types.is_empty() {
            params = params.with_day_types(self.day_types.iter().copied());
        }
        Ok(params)
    }
}
