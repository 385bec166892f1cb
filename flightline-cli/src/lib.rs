//! Command-line interface for the Flightline ingestion tooling.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod load;

pub use error::CliError;

const ARG_FLIGHTS_CSV: &str = "flights-csv";
const ARG_DATABASE: &str = "database";
const ARG_SOURCE: &str = "source";
const ENV_FLIGHTS_CSV: &str = "FLIGHTLINE_CMDS_LOAD_FLIGHTS_CSV";

/// Run the Flightline CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Load(args) => load::run_load(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "flightline",
    about = "Flight-records ingestion utilities",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load flight records from a configured source into a SQLite database.
    Load(load::LoadArgs),
}

#[cfg(test)]
mod tests;
