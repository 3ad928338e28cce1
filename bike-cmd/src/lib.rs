//! Command implementations for the bike sharing dashboard CLI.
//!
//! Every subcommand loads the dataset once, resolves the filter and runs a
//! single `render` pass; the subcommands differ only in how they present
//! the resulting view model.

use anyhow::Context;
use clap::Subcommand;
use log::info;
use std::path::{Path, PathBuf};

pub mod export;
pub mod options;
pub mod report;

use options::{DataArgs, FilterArgs};

#[derive(Subcommand)]
pub enum Command {
    /// Print a text report of the dashboard for the selected filters
    Summary {
        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Write the dashboard view model as JSON
    Export {
        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        filter: FilterArgs,

        /// Output path for the JSON file
        #[arg(short = 'o', long)]
        output: PathBuf,
    },

    /// Write each dashboard summary as a CSV file into a directory
    ExportCsv {
        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        filter: FilterArgs,

        /// Directory receiving daily.csv, seasons.csv, day_types.csv, hourly.csv and weather.csv
        #[arg(long)]
        output_dir: PathBuf,
    },

    /// Print the first and last date of the dataset
    Bounds {
        #[command(flatten)]
        data: DataArgs,
    },
}

fn build_view_model(data: &DataArgs, filter: &FilterArgs) -> anyhow::Result<bike_data::ViewModel> {
    let store = data.load()?;
    let params = filter.resolve(&store)?;
    bike_data::render(&store, &params).context("Failed to summarize dataset")
}

pub fn run_summary(data: &DataArgs, filter: &FilterArgs) -> anyhow::Result<()> {
    let model = build_view_model(data, filter)?;
    print!("{}", report::format_report(&model));
    Ok(())
}

pub fn run_export(data: &DataArgs, filter: &FilterArgs, output: &Path) -> anyhow::Result<()> {
    let model = build_view_model(data, filter)?;
    export::write_json(&model, output)?;
    info!("Export complete. Output: {}", output.display());
    Ok(())
}

pub fn run_export_csv(data: &DataArgs, filter: &FilterArgs, output_dir: &Path) -> anyhow::Result<()> {
    let model = build_view_model(data, filter)?;
    match model.summary() {
        Some(summary) => {
            let paths = export::write_csv_dir(summary, output_dir)?;
            info!(
                "Export complete. Wrote {} files to {}",
                paths.len(),
                output_dir.display()
            );
        }
        None => println!("{}", report::NO_DATA_MESSAGE),
    }
    Ok(())
}

pub fn run_bounds(data: &DataArgs) -> anyhow::Result<()> {
    let store = data.load()?;
    println!("{}", report::format_bounds(&store));
    Ok(())
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Summary { data, filter } => run_summary(&data, &filter),
        Command::Export {
            data,
            filter,
            output,
        } => run_export(&data, &filter, &output),
        Command::ExportCsv {
            data,
            filter,
            output_dir,
        } => run_export_csv(&data, &filter, &output_dir),
        Command::Bounds { data } => run_bounds(&data),
    }
}
