//! JSON and CSV export of the dashboard view model.

use anyhow::Context;
use bike_core::Season;
use bike_data::aggregation::weather_by_hour;
use bike_data::models::SeasonSummary;
use bike_data::{DashboardSummary, ViewModel};
use chrono::NaiveDate;
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Write the view model as pretty-printed JSON.
pub fn write_json(model: &ViewModel, output: &Path) -> anyhow::Result<()> {
    let file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), model)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!("[Bike Debug] export: wrote view model to {}", output.display());
    Ok(())
}

/// Season row with the identity of the extreme records flattened into columns.
#[derive(Serialize)]
struct SeasonRow {
    season: Season,
    max: u32,
    max_date: NaiveDate,
    max_hour: u8,
    min: u32,
    min_date: NaiveDate,
    min_hour: u8,
}

impl From<&SeasonSummary> for SeasonRow {
    fn from(s: &SeasonSummary) -> Self {
        SeasonRow {
            season: s.season,
            max: s.max,
            max_date: s.max_at.date,
            max_hour: s.max_at.hour,
            min: s.min,
            min_date: s.min_at.date,
            min_hour: s.min_at.hour,
        }
    }
}

fn write_rows<T, I>(path: &Path, rows: I) -> anyhow::Result<usize>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut count = 0;
    for row in rows {
        writer.serialize(row)?;
        count += 1;
    }
    writer.flush()?;
    info!("[Bike Debug] export: wrote {} rows to {}", count, path.display());
    Ok(count)
}

/// Write one CSV file per summary into `dir`, creating it if needed.
/// Returns the paths written.
pub fn write_csv_dir(summary: &DashboardSummary, dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;

    let daily = dir.join("daily.csv");
    write_rows(&daily, &summary.daily)?;
    let seasons = dir.join("seasons.csv");
    write_rows(&seasons, summary.seasons.iter().map(SeasonRow::from))?;
    let day_types = dir.join("day_types.csv");
    write_rows(&day_types, &summary.day_types)?;
    let hourly = dir.join("hourly.csv");
    write_rows(&hourly, &summary.hourly)?;
    let weather = dir.join("weather.csv");
    write_rows(&weather, weather_by_hour(&summary.weather))?;

    Ok(vec![daily, seasons, day_types, hourly, weather])
}
