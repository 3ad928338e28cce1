use crate::error::{DashboardError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A closed calendar interval `[start, end]`, with `start <= end` enforced
/// on construction.
///
/// Serializes as a two element array `["YYYY-MM-DD", "YYYY-MM-DD"]`.
#[derive(Clone, Eq, PartialEq, Copy, Debug, Serialize, Deserialize)]
#[serde(try_from = "[NaiveDate; 2]", into = "[NaiveDate; 2]")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(DashboardError::InvalidRange { start, end });
        }
        Ok(DateRange { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive on both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered, counting both ends.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// True when every day of `self` lies inside `other`.
    pub fn is_within(&self, other: &DateRange) -> bool {
        other.start <= self.start && self.end <= other.end
    }
}

impl TryFrom<[NaiveDate; 2]> for DateRange {
    type Error = DashboardError;

    fn try_from(value: [NaiveDate; 2]) -> Result<Self> {
        DateRange::new(value[0], value[1])
    }
}

impl From<DateRange> for [NaiveDate; 2] {
    fn from(range: DateRange) -> Self {
        [range.start, range.end]
    }
}
