//! Display categories for the raw integer codes of the bike sharing dataset.
//!
//! The dataset encodes season, weather situation and working-day flag as
//! small integers. Each maps onto a closed enum; a code outside the mapping
//! is a data-integrity error, never a silent default.

use crate::error::{CodeField, DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Meteorological season of a record (`season` column, codes 1-4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Season {
    Spring = 1,
    Summer = 2,
    Fall = 3,
    Winter = 4,
}

/// Weather situation of a record (`weathersit` column, codes 1-4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Weather {
    /// Clear, few clouds, partly cloudy.
    Clear = 1,
    /// Mist and cloudy, broken clouds.
    Misty = 2,
    /// Light snow, light rain, scattered clouds.
    LightPrecipitation = 3,
    /// Heavy rain, ice pellets, thunderstorm, snow and fog.
    HeavyPrecipitation = 4,
}

/// Whether a record falls on a working day (`workingday` column, codes 0/1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum DayType {
    WeekendOrHoliday = 0,
    Weekday = 1,
}

/// Translate a `season` code into its label.
pub fn map_season(code: i64) -> Result<Season> {
    match code {
        1 => Ok(Season::Spring),
        2 => Ok(Season::Summer),
        3 => Ok(Season::Fall),
        4 => Ok(Season::Winter),
        _ => Err(DashboardError::UnmappedCode {
            field: CodeField::Season,
            code,
        }),
    }
}

/// Translate a `weathersit` code into its label.
pub fn map_weather(code: i64) -> Result<Weather> {
    match code {
        1 => Ok(Weather::Clear),
        2 => Ok(Weather::Misty),
        3 => Ok(Weather::LightPrecipitation),
        4 => Ok(Weather::HeavyPrecipitation),
        _ => Err(DashboardError::UnmappedCode {
            field: CodeField::Weather,
            code,
        }),
    }
}

/// Translate a `workingday` flag into its label. Only 0 and 1 are flags.
pub fn map_day_type(code: i64) -> Result<DayType> {
    match code {
        0 => Ok(DayType::WeekendOrHoliday),
        1 => Ok(DayType::Weekday),
        _ => Err(DashboardError::UnmappedCode {
            field: CodeField::WorkingDay,
            code,
        }),
    }
}

impl DayType {
    pub fn is_working_day(self) -> bool {
        self == DayType::Weekday
    }
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

impl Weather {
    pub const ALL: [Weather; 4] = [
        Weather::Clear,
        Weather::Misty,
        Weather::LightPrecipitation,
        Weather::HeavyPrecipitation,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Weather::Clear => "Clear",
            Weather::Misty => "Misty",
            Weather::LightPrecipitation => "LightPrecipitation",
            Weather::HeavyPrecipitation => "HeavyPrecipitation",
        }
    }
}

impl DayType {
    pub const ALL: [DayType; 2] = [DayType::WeekendOrHoliday, DayType::Weekday];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            DayType::WeekendOrHoliday => "WeekendOrHoliday",
            DayType::Weekday => "Weekday",
        }
    }
}

/// A label name that matches no variant of the requested category.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {category} label '{value}' (expected one of: {expected})")]
pub struct ParseLabelError {
    category: &'static str,
    value: String,
    expected: String,
}

/// Case-insensitive match ignoring separators, so `weekend-or-holiday`,
/// `Weekend Or Holiday` and `WeekendOrHoliday` all name the same label.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' ' | '/'))
        .flat_map(char::to_lowercase)
        .collect()
}

fn parse_label<T: Copy>(
    category: &'static str,
    input: &str,
    all: &[T],
    name: fn(T) -> &'static str,
) -> std::result::Result<T, ParseLabelError> {
    let wanted = normalize(input);
    all.iter()
        .copied()
        .find(|label| normalize(name(*label)) == wanted)
        .ok_or_else(|| ParseLabelError {
            category,
            value: input.to_string(),
            expected: all
                .iter()
                .map(|label| name(*label))
                .collect::<Vec<_>>()
                .join(", "),
        })
}

impl FromStr for Season {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        parse_label("season", s, &Season::ALL, Season::name)
    }
}

impl FromStr for Weather {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        parse_label("weather", s, &Weather::ALL, Weather::name)
    }
}

impl FromStr for DayType {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        parse_label("day type", s, &DayType::ALL, DayType::name)
    }
}

// Deserialization accepts the same spellings as `FromStr`; serialization
// keeps the variant name, which is also the display name.
macro_rules! deserialize_via_from_str {
    ($($label:ty),*) => {
        $(
            impl TryFrom<String> for $label {
                type Error = ParseLabelError;

                fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
                    value.parse()
                }
            }
        )*
    };
}

deserialize_via_from_str!(Season, Weather, DayType);

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_codes_map_in_order() {
        let labels: Vec<Season> = (1..=4).map(|c| map_season(c).unwrap()).collect();
        assert_eq!(labels, Season::ALL.to_vec());
        for season in Season::ALL {
            assert_eq!(map_season(season.code() as i64).unwrap(), season);
        }
    }

    #[test]
    fn test_weather_codes_map_in_order() {
        assert_eq!(map_weather(1).unwrap(), Weather::Clear);
        assert_eq!(map_weather(2).unwrap(), Weather::Misty);
        assert_eq!(map_weather(3).unwrap(), Weather::LightPrecipitation);
        assert_eq!(map_weather(4).unwrap(), Weather::HeavyPrecipitation);
    }

    #[test]
    fn test_unmapped_codes_are_rejected() {
        assert!(matches!(
            map_season(0),
            Err(DashboardError::UnmappedCode {
                field: CodeField::Season,
                code: 0
            })
        ));
        assert!(matches!(
            map_weather(5),
            Err(DashboardError::UnmappedCode {
                field: CodeField::Weather,
                code: 5
            })
        ));
        assert!(matches!(
            map_day_type(2),
            Err(DashboardError::UnmappedCode {
                field: CodeField::WorkingDay,
                code: 2
            })
        ));
    }

    #[test]
    fn test_day_type_follows_working_day_flag() {
        assert_eq!(map_day_type(0).unwrap(), DayType::WeekendOrHoliday);
        assert_eq!(map_day_type(1).unwrap(), DayType::Weekday);
        assert!(DayType::Weekday.is_working_day());
        assert!(!DayType::WeekendOrHoliday.is_working_day());
    }

    #[test]
    fn test_labels_parse_from_display_names() {
        assert_eq!("Summer".parse::<Season>().unwrap(), Season::Summer);
        assert_eq!("winter".parse::<Season>().unwrap(), Season::Winter);
        assert_eq!(
            "weekend-or-holiday".parse::<DayType>().unwrap(),
            DayType::WeekendOrHoliday
        );
        assert_eq!(
            "light_precipitation".parse::<Weather>().unwrap(),
            Weather::LightPrecipitation
        );
        for day_type in DayType::ALL {
            assert_eq!(day_type.to_string().parse::<DayType>().unwrap(), day_type);
        }
    }

    #[test]
    fn test_unknown_label_lists_the_choices() {
        let err = "Monsoon".parse::<Season>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown season label 'Monsoon' (expected one of: Spring, Summer, Fall, Winter)"
        );
    }

    #[test]
    fn test_labels_order_by_code() {
        assert!(Season::Spring < Season::Winter);
        assert!(DayType::WeekendOrHoliday < DayType::Weekday);
        assert!(Weather::Clear < Weather::Misty);
    }
}
