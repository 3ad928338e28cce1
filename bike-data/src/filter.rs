//! Selecting the records a dashboard shows.
//!
//! A filter is a closed date range plus the sets of allowed seasons and day
//! types. Filtering never mutates the store; it yields a [`FilteredView`]
//! borrowing the matching records in store (chronological) order, or
//! [`FilterOutcome::EmptyResultSet`] when nothing matches.

use bike_core::{DateRange, DayType, Record, RecordStore, Result, Season};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

fn all_seasons() -> BTreeSet<Season> {
    Season::ALL.into_iter().collect()
}

fn all_day_types() -> BTreeSet<DayType> {
    DayType::ALL.into_iter().collect()
}

/// The filter parameters supplied by the UI.
///
/// When deserialized, a missing `seasons` or `day_types` key means "all";
/// an explicit empty list allows nothing.
///
/// ```json
/// { "date_range": ["2011-01-01", "2011-12-31"], "seasons": ["Summer", "Fall"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterParams {
    pub date_range: DateRange,
    #[serde(default = "all_seasons")]
    pub seasons: BTreeSet<Season>,
    #[serde(default = "all_day_types")]
    pub day_types: BTreeSet<DayType>,
}

impl FilterParams {
    /// Parameters for `[start, end]` with every season and day type allowed.
    /// Fails with `InvalidRange` when `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        Ok(Self::for_range(DateRange::new(start, end)?))
    }

    pub fn for_range(date_range: DateRange) -> Self {
        FilterParams {
            date_range,
            seasons: all_seasons(),
            day_types: all_day_types(),
        }
    }

    /// The initial dashboard state: the store's whole span, everything
    /// allowed. `None` for an empty store.
    pub fn for_store(store: &RecordStore) -> Option<Self> {
        store.date_bounds().map(Self::for_range)
    }

    pub fn with_seasons<I: IntoIterator<Item = Season>>(mut self, seasons: I) -> Self {
        self.seasons = seasons.into_iter().collect();
        self
    }

    pub fn with_day_types<I: IntoIterator<Item = DayType>>(mut self, day_types: I) -> Self {
        self.day_types = day_types.into_iter().collect();
        self
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.date_range.contains(record.date)
            && self.seasons.contains(&record.season)
            && self.day_types.contains(&record.day_type)
    }

    /// True when every record `other` accepts is also accepted by `self`.
    pub fn is_superset_of(&self, other: &FilterParams) -> bool {
        other.date_range.is_within(&self.date_range)
            && other.seasons.is_subset(&self.seasons)
            && other.day_types.is_subset(&self.day_types)
    }
}

/// A non-empty, read-only, chronologically ordered subset of a store.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    records: Vec<&'a Record>,
    params: FilterParams,
}

/// Result of applying a filter. An empty result is a terminal state the
/// presentation layer reports as "no data", not an error.
#[derive(Debug, Clone)]
pub enum FilterOutcome<'a> {
    Matched(FilteredView<'a>),
    EmptyResultSet,
}

impl<'a> FilterOutcome<'a> {
    fn from_records(records: Vec<&'a Record>, params: &FilterParams) -> Self {
        if records.is_empty() {
            FilterOutcome::EmptyResultSet
        } else {
            FilterOutcome::Matched(FilteredView {
                records,
                params: params.clone(),
            })
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FilterOutcome::EmptyResultSet)
    }

    pub fn into_view(self) -> Option<FilteredView<'a>> {
        match self {
            FilterOutcome::Matched(view) => Some(view),
            FilterOutcome::EmptyResultSet => None,
        }
    }
}

/// Select the records of `store` accepted by `params`, keeping store order.
pub fn apply_filter<'a>(store: &'a RecordStore, params: &FilterParams) -> FilterOutcome<'a> {
    let records: Vec<&Record> = store.records().iter().filter(|r| params.matches(r)).collect();
    log::debug!(
        "[Bike Debug] filter: {} of {} records match {:?}",
        records.len(),
        store.len(),
        params
    );
    FilterOutcome::from_records(records, params)
}

impl<'a> FilteredView<'a> {
    pub fn records(&self) -> &[&'a Record] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a view produced by [`apply_filter`].
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn params(&self) -> &FilterParams {
        &self.params
    }

    /// Filter this view again. The result is always a subset of `self`.
    pub fn refine(&self, params: &FilterParams) -> FilterOutcome<'a> {
        let records: Vec<&'a Record> = self.iter().filter(|r| params.matches(r)).collect();
        FilterOutcome::from_records(records, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bike_core::LoadPolicy;

    const SAMPLE_HOURLY_CSV: &str = include_str!("../../fixtures/hourly_sample.csv");

    fn sample_store() -> RecordStore {
        RecordStore::from_csv_str(SAMPLE_HOURLY_CSV, LoadPolicy::Strict).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_params_select_everything() {
        let store = sample_store();
        let params = FilterParams::for_store(&store).unwrap();
        let view = apply_filter(&store, &params).into_view().unwrap();
        assert_eq!(view.len(), store.len());
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        let err = FilterParams::new(day(2011, 6, 1), day(2011, 1, 1)).unwrap_err();
        assert!(matches!(err, bike_core::DashboardError::InvalidRange { .. }));
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let store = sample_store();
        let params = FilterParams::new(day(2011, 1, 3), day(2011, 6, 1)).unwrap();
        let view = apply_filter(&store, &params).into_view().unwrap();
        // 3 records on 2011-01-03 and 3 on 2011-06-01
        assert_eq!(view.len(), 6);
        assert_eq!(view.records()[0].date, day(2011, 1, 3));
        assert_eq!(view.records()[5].date, day(2011, 6, 1));
    }

    #[test]
    fn test_season_and_day_type_sets_combine() {
        let store = sample_store();
        let params = FilterParams::for_store(&store)
            .unwrap()
            .with_seasons([Season::Summer, Season::Winter])
            .with_day_types([DayType::WeekendOrHoliday]);
        let view = apply_filter(&store, &params).into_view().unwrap();
        assert_eq!(view.len(), 4);
        assert!(view
            .iter()
            .all(|r| r.day_type == DayType::WeekendOrHoliday && r.season != Season::Spring));
    }

    #[test]
    fn test_view_preserves_store_order() {
        let store = sample_store();
        let params = FilterParams::for_store(&store)
            .unwrap()
            .with_day_types([DayType::Weekday]);
        let view = apply_filter(&store, &params).into_view().unwrap();
        let keys: Vec<_> = view.iter().map(Record::chrono_key).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_empty_sets_and_missing_seasons_yield_empty_result() {
        let store = sample_store();
        let no_seasons = FilterParams::for_store(&store)
            .unwrap()
            .with_seasons(Vec::new());
        assert!(apply_filter(&store, &no_seasons).is_empty());

        // The fixture has no Fall records.
        let fall_only = FilterParams::for_store(&store)
            .unwrap()
            .with_seasons([Season::Fall]);
        assert!(apply_filter(&store, &fall_only).is_empty());
    }

    #[test]
    fn test_range_outside_dataset_yields_empty_result() {
        let store = sample_store();
        let params = FilterParams::new(day(2013, 1, 1), day(2013, 12, 31)).unwrap();
        let outcome = apply_filter(&store, &params);
        assert!(outcome.is_empty());
        assert!(outcome.into_view().is_none());
    }

    #[test]
    fn test_refine_with_superset_is_idempotent() {
        let store = sample_store();
        let narrow = FilterParams::new(day(2011, 1, 1), day(2011, 6, 30))
            .unwrap()
            .with_seasons([Season::Spring]);
        let view = apply_filter(&store, &narrow).into_view().unwrap();

        let wide = FilterParams::for_store(&store).unwrap();
        assert!(wide.is_superset_of(&narrow));
        let refined = view.refine(&wide).into_view().unwrap();
        assert_eq!(refined.records(), view.records());

        let again = view.refine(&narrow).into_view().unwrap();
        assert_eq!(again.records(), view.records());
    }

    #[test]
    fn test_params_deserialize_with_defaults() {
        let json = r#"{ "date_range": ["2011-01-01", "2011-12-31"], "seasons": ["Summer"] }"#;
        let params: FilterParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.date_range.start(), day(2011, 1, 1));
        assert_eq!(params.seasons.len(), 1);
        assert_eq!(params.day_types.len(), 2);

        let json = r#"{ "date_range": ["2011-01-01", "2011-12-31"], "day_types": [] }"#;
        let params: FilterParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.seasons.len(), 4);
        assert!(params.day_types.is_empty());
    }

    #[test]
    fn test_params_accept_label_spellings_like_the_cli() {
        let json = r#"{
            "date_range": ["2011-01-01", "2011-12-31"],
            "seasons": ["summer", "WINTER"],
            "day_types": ["weekend-or-holiday"]
        }"#;
        let params: FilterParams = serde_json::from_str(json).unwrap();
        assert_eq!(
            params.seasons.into_iter().collect::<Vec<_>>(),
            vec![Season::Summer, Season::Winter]
        );
        assert_eq!(
            params.day_types.into_iter().collect::<Vec<_>>(),
            vec![DayType::WeekendOrHoliday]
        );

        let json = r#"{ "date_range": ["2011-01-01", "2011-12-31"], "seasons": ["monsoon"] }"#;
        let err = serde_json::from_str::<FilterParams>(json).unwrap_err();
        assert!(err.to_string().contains("unknown season label 'monsoon'"));
    }

    #[test]
    fn test_params_serialize_display_names() {
        let params = FilterParams::new(day(2011, 1, 1), day(2011, 1, 2))
            .unwrap()
            .with_day_types([DayType::WeekendOrHoliday]);
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["day_types"][0], "WeekendOrHoliday");
        assert_eq!(json["seasons"][3], "Winter");
    }

    #[test]
    fn test_params_reject_reversed_range_when_deserializing() {
        let json = r#"{ "date_range": ["2011-12-31", "2011-01-01"] }"#;
        assert!(serde_json::from_str::<FilterParams>(json).is_err());
    }
}
