//! Core types for bike sharing rental data: decoded records, label
//! mapping, date ranges and the read-only record store.

pub mod date_range;
pub mod error;
pub mod labels;
pub mod record;
pub mod store;

pub use date_range::DateRange;
pub use error::{DashboardError, Result};
pub use labels::{DayType, Season, Weather};
pub use record::Record;
pub use store::{LoadPolicy, RecordStore};
