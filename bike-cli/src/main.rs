//! Bike CLI - Command line tool for summarizing bike sharing rental data.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "bike-cli",
    version,
    about = "Bike sharing rentals dashboard toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: bike_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    bike_cmd::run(cli.command)
}
