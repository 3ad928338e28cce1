//! Best and worst record lookup.
//!
//! Ties on `rental_count` go to the chronologically first record (earlier
//! date, then earlier hour), independent of the order records are visited.

use crate::models::Extremes;
use bike_core::{DashboardError, Record, Result};

/// Running argmax/argmin over records.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ExtremeTracker<'a> {
    max: &'a Record,
    min: &'a Record,
}

impl<'a> ExtremeTracker<'a> {
    pub(crate) fn new(first: &'a Record) -> Self {
        ExtremeTracker {
            max: first,
            min: first,
        }
    }

    pub(crate) fn observe(&mut self, record: &'a Record) {
        let earlier = record.chrono_key() < self.max.chrono_key();
        if record.rental_count > self.max.rental_count
            || (record.rental_count == self.max.rental_count && earlier)
        {
            self.max = record;
        }
        let earlier = record.chrono_key() < self.min.chrono_key();
        if record.rental_count < self.min.rental_count
            || (record.rental_count == self.min.rental_count && earlier)
        {
            self.min = record;
        }
    }

    pub(crate) fn max(&self) -> &'a Record {
        self.max
    }

    pub(crate) fn min(&self) -> &'a Record {
        self.min
    }
}

/// Find the record with the highest and the one with the lowest rental count.
///
/// Fails with `EmptyInput` when `records` is empty; a [`FilteredView`]
/// never is, so this only fires on a composition bug.
///
/// [`FilteredView`]: crate::filter::FilteredView
pub fn locate_extremes(records: &[&Record]) -> Result<Extremes> {
    let (first, rest) = records.split_first().ok_or(DashboardError::EmptyInput)?;
    let mut tracker = ExtremeTracker::new(first);
    for record in rest {
        tracker.observe(record);
    }
    Ok(Extremes {
        max: *tracker.max(),
        min: *tracker.min(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(date: (i32, u32, u32), hour: i64, season: i64, count: i64) -> Record {
        let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        Record::from_codes(date, hour, season, 1, 1, count).unwrap()
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(matches!(locate_extremes(&[]), Err(DashboardError::EmptyInput)));
    }

    #[test]
    fn test_single_record_is_both_extremes() {
        let only = record((2011, 1, 1), 0, 1, 7);
        let extremes = locate_extremes(&[&only]).unwrap();
        assert_eq!(extremes.max, only);
        assert_eq!(extremes.min, only);
    }

    #[test]
    fn test_three_record_example() {
        let a = record((2011, 1, 1), 0, 1, 10);
        let b = record((2011, 1, 2), 0, 1, 50);
        let c = record((2011, 1, 3), 0, 2, 5);
        let extremes = locate_extremes(&[&a, &b, &c]).unwrap();
        assert_eq!(extremes.max, b);
        assert_eq!(extremes.min, c);
    }

    #[test]
    fn test_ties_go_to_the_earliest_record() {
        let early = record((2011, 1, 1), 9, 1, 30);
        let same_day_later = record((2011, 1, 1), 10, 1, 30);
        let next_day = record((2011, 1, 2), 0, 1, 30);
        let forward = locate_extremes(&[&early, &same_day_later, &next_day]).unwrap();
        let backward = locate_extremes(&[&next_day, &same_day_later, &early]).unwrap();
        assert_eq!(forward.max, early);
        assert_eq!(forward.min, early);
        assert_eq!(backward.max, early);
        assert_eq!(backward.min, early);
    }

    #[test]
    fn test_same_date_ties_break_on_hour() {
        let late = record((2011, 5, 5), 18, 2, 3);
        let early = record((2011, 5, 5), 4, 2, 3);
        let peak = record((2011, 5, 5), 12, 2, 90);
        let extremes = locate_extremes(&[&late, &peak, &early]).unwrap();
        assert_eq!(extremes.min, early);
        assert_eq!(extremes.max, peak);
    }
}
