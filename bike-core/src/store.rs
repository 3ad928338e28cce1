//! The read-only in-memory record store and its CSV loader.
//!
//! The store is built once at process start and handed by reference to the
//! filter and aggregation code; nothing mutates it after loading.
//!
//! # CSV Format
//!
//! Headers are required. The loader reads `dteday`, `season`, `weathersit`,
//! `workingday`, `cnt` and, when present, `hr`:
//!
//! ```text
//! instant,dteday,season,yr,mnth,hr,holiday,weekday,workingday,weathersit,temp,casual,registered,cnt
//! 1,2011-01-01,1,0,1,0,0,6,0,1,0.24,3,13,16
//! ```
//!
//! Paths ending in `.gz` are read through a gzip decoder.

use crate::date_range::DateRange;
use crate::error::{DashboardError, Result};
use crate::record::{date_bounds, RawRecord, Record};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// What to do with a row that fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Log and skip the row, keep loading.
    #[default]
    SkipInvalid,
    /// Abort the whole load on the first invalid row.
    Strict,
}

/// Immutable, chronologically ordered collection of rental records.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
    skipped_rows: usize,
}

impl RecordStore {
    /// Build a store from already validated records. Records are put into
    /// chronological order (date, then hour); equal keys keep their input
    /// order.
    pub fn new(mut records: Vec<Record>) -> Self {
        records.sort_by_key(Record::chrono_key);
        RecordStore {
            records,
            skipped_rows: 0,
        }
    }

    /// Open a dataset file, transparently decompressing `*.gz`.
    pub fn open<P: AsRef<Path>>(path: P, policy: LoadPolicy) -> Result<Self> {
        let path = path.as_ref();
        let file = BufReader::new(File::open(path)?);
        let is_gzip = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));
        log::info!(
            "[Bike Debug] loader: Opening {} (gzip: {})",
            path.display(),
            is_gzip
        );
        if is_gzip {
            Self::from_reader(GzDecoder::new(file), policy)
        } else {
            Self::from_reader(file, policy)
        }
    }

    /// Load records from an in-memory CSV string.
    ///
    /// # Example
    /// ```rust
    /// use bike_core::store::{LoadPolicy, RecordStore};
    ///
    /// let csv = "dteday,hr,season,weathersit,workingday,cnt\n2011-01-01,0,1,1,0,16\n";
    /// let store = RecordStore::from_csv_str(csv, LoadPolicy::Strict).unwrap();
    /// assert_eq!(store.len(), 1);
    /// ```
    pub fn from_csv_str(csv_data: &str, policy: LoadPolicy) -> Result<Self> {
        Self::from_reader(csv_data.as_bytes(), policy)
    }

    /// Load records from any CSV source.
    ///
    /// Row-level problems (unmapped codes, bad dates, out of range hours,
    /// unparsable numbers, missing fields, invalid UTF-8) are handled
    /// according to `policy`. I/O errors of the underlying reader always
    /// abort the load.
    pub fn from_reader<R: Read>(reader: R, policy: LoadPolicy) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = rdr.headers()?.clone();

        let mut records = Vec::new();
        let mut skipped = 0usize;
        for result in rdr.records() {
            let parsed = match result {
                Ok(row) => {
                    let line = row.position().map_or(0, |p| p.line());
                    row.deserialize::<RawRecord>(Some(&headers))
                        .map_err(DashboardError::from)
                        .and_then(Record::try_from)
                        .map_err(|e| (line, e))
                }
                // Only a failing source aborts; a malformed row is a row error.
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    let line = e.position().map_or(0, |p| p.line());
                    Err((line, DashboardError::from(e)))
                }
            };
            match parsed {
                Ok(record) => records.push(record),
                Err((line, e)) => {
                    let err = DashboardError::InvalidRow {
                        line,
                        source: Box::new(e),
                    };
                    match policy {
                        LoadPolicy::Strict => return Err(err),
                        LoadPolicy::SkipInvalid => {
                            log::warn!("[Bike Debug] loader: Skipping row: {}", err);
                            skipped += 1;
                        }
                    }
                }
            }
        }
        log::info!(
            "[Bike Debug] loader: Loaded {} records, skipped {} invalid",
            records.len(),
            skipped
        );
        let mut store = RecordStore::new(records);
        store.skipped_rows = skipped;
        Ok(store)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows dropped by a [`LoadPolicy::SkipInvalid`] load.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// First and last date of the dataset; `None` for an empty store.
    pub fn date_bounds(&self) -> Option<DateRange> {
        date_bounds(&self.records)
    }

    /// Total rentals across the whole dataset.
    pub fn total_rentals(&self) -> u64 {
        self.records.iter().map(|r| r.rental_count as u64).sum()
    }
}
