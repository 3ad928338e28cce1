use crate::date_range::DateRange;
use crate::error::{DashboardError, Result};
use crate::labels::{map_day_type, map_season, map_weather, DayType, Season, Weather};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format of the `dteday` column: "YYYY-MM-DD"
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Highest valid value of the `hr` column.
pub const MAX_HOUR: u8 = 23;

/// One observation of the bike sharing dataset: the rentals of a single
/// hour (or a whole day, for daily-granularity data) together with its
/// decoded labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    pub date: NaiveDate,
    /// Hour of day, 0-23. Daily-granularity rows carry 0.
    pub hour: u8,
    pub season: Season,
    pub weather: Weather,
    pub day_type: DayType,
    pub rental_count: u32,
}

/// A dataset row as it appears in the CSV, before validation.
///
/// Columns are matched by header name; any other column of the file
/// (`instant`, `temp`, `casual`, ...) is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    pub dteday: String,
    #[serde(default)]
    pub hr: Option<i64>,
    pub season: i64,
    pub weathersit: i64,
    pub workingday: i64,
    pub cnt: i64,
}

impl Record {
    /// Build a record from raw dataset codes, rejecting anything the label
    /// mapping or the value ranges do not cover.
    pub fn from_codes(
        date: NaiveDate,
        hour: i64,
        season_code: i64,
        weather_code: i64,
        working_day_code: i64,
        rental_count: i64,
    ) -> Result<Record> {
        if !(0..=MAX_HOUR as i64).contains(&hour) {
            return Err(DashboardError::HourOutOfRange(hour));
        }
        let rental_count = u32::try_from(rental_count)
            .map_err(|_| DashboardError::NegativeCount(rental_count))?;
        Ok(Record {
            date,
            hour: hour as u8,
            season: map_season(season_code)?,
            weather: map_weather(weather_code)?,
            day_type: map_day_type(working_day_code)?,
            rental_count,
        })
    }

    pub fn is_working_day(&self) -> bool {
        self.day_type.is_working_day()
    }

    /// Chronological position of the record: date first, then hour.
    pub fn chrono_key(&self) -> (NaiveDate, u8) {
        (self.date, self.hour)
    }
}

/// Parse a `dteday` value. A trailing time part ("2011-01-01 00:00:00")
/// is ignored since records are keyed by calendar date.
pub fn parse_dataset_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    let date_part = trimmed.split([' ', 'T']).next().unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, DATE_FORMAT)
        .map_err(|_| DashboardError::InvalidDate(trimmed.to_string()))
}

impl TryFrom<RawRecord> for Record {
    type Error = DashboardError;

    fn try_from(value: RawRecord) -> Result<Self> {
        let date = parse_dataset_date(&value.dteday)?;
        Record::from_codes(
            date,
            value.hr.unwrap_or(0),
            value.season,
            value.weathersit,
            value.workingday,
            value.cnt,
        )
    }
}

/// Earliest and latest date among `records`, if any.
pub fn date_bounds<'a, I>(records: I) -> Option<DateRange>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut iter = records.into_iter();
    let first = iter.next()?;
    let (min, max) = iter.fold((first.date, first.date), |(min, max), r| {
        (min.min(r.date), max.max(r.date))
    });
    DateRange::new(min, max).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_codes_decodes_labels() {
        let record = Record::from_codes(day(2011, 1, 1), 8, 1, 2, 0, 42).unwrap();
        assert_eq!(record.season, Season::Spring);
        assert_eq!(record.weather, Weather::Misty);
        assert_eq!(record.day_type, DayType::WeekendOrHoliday);
        assert_eq!(record.rental_count, 42);
        assert!(!record.is_working_day());
    }

    #[test]
    fn test_from_codes_rejects_bad_values() {
        assert!(matches!(
            Record::from_codes(day(2011, 1, 1), 24, 1, 1, 1, 1),
            Err(DashboardError::HourOutOfRange(24))
        ));
        assert!(matches!(
            Record::from_codes(day(2011, 1, 1), 0, 1, 1, 1, -3),
            Err(DashboardError::NegativeCount(-3))
        ));
        assert!(matches!(
            Record::from_codes(day(2011, 1, 1), 0, 5, 1, 1, 3),
            Err(DashboardError::UnmappedCode { .. })
        ));
    }

    #[test]
    fn test_parse_dataset_date_ignores_time_part() {
        assert_eq!(parse_dataset_date("2011-01-01").unwrap(), day(2011, 1, 1));
        assert_eq!(
            parse_dataset_date(" 2012-12-31 00:00:00").unwrap(),
            day(2012, 12, 31)
        );
        assert_eq!(
            parse_dataset_date("2012-02-29T00:00:00").unwrap(),
            day(2012, 2, 29)
        );
        assert!(matches!(
            parse_dataset_date("01/01/2011"),
            Err(DashboardError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_records_order_by_date_then_hour() {
        let a = Record::from_codes(day(2011, 1, 1), 23, 1, 1, 0, 1).unwrap();
        let b = Record::from_codes(day(2011, 1, 2), 0, 1, 1, 0, 1).unwrap();
        let c = Record::from_codes(day(2011, 1, 2), 5, 1, 1, 0, 1).unwrap();
        let mut records = vec![c, a, b];
        records.sort_by_key(Record::chrono_key);
        assert_eq!(records, vec![a, b, c]);
    }

    #[test]
    fn test_date_bounds_spans_all_records() {
        let records = vec![
            Record::from_codes(day(2011, 3, 1), 0, 1, 1, 0, 1).unwrap(),
            Record::from_codes(day(2011, 1, 9), 0, 1, 1, 0, 1).unwrap(),
            Record::from_codes(day(2011, 7, 4), 0, 3, 1, 0, 1).unwrap(),
        ];
        let bounds = date_bounds(&records).unwrap();
        assert_eq!(bounds.start(), day(2011, 1, 9));
        assert_eq!(bounds.end(), day(2011, 7, 4));
        assert!(date_bounds(&Vec::<Record>::new()).is_none());
    }
}
