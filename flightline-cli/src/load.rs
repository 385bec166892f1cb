//! Load command implementation for the Flightline CLI.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use clap::{Parser, ValueEnum};
use flightline_core::SqliteDataStore;
use flightline_data::{CsvFlightLoader, DataLoader, DatabaseLoader, FlightIngestSummary};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{ARG_DATABASE, ARG_FLIGHTS_CSV, ARG_SOURCE, CliError, ENV_FLIGHTS_CSV};

/// Database file written when `--database` is not supplied.
const DEFAULT_DATABASE: &str = "flights.db";

/// CLI arguments for the `load` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Load flight records into a SQLite database. The records \
                 file and database paths can come from CLI flags, \
                 configuration files, or environment variables.",
    about = "Load flight records into a SQLite database"
)]
#[ortho_config(prefix = "FLIGHTLINE")]
pub(crate) struct LoadArgs {
    /// Path to the delimited flight-records file.
    #[arg(long = ARG_FLIGHTS_CSV, value_name = "path")]
    #[serde(default)]
    pub(crate) flights_csv: Option<Utf8PathBuf>,
    /// Path to the SQLite database that receives the records.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Source to load records from.
    #[arg(long = ARG_SOURCE, value_enum, value_name = "source")]
    #[serde(default)]
    pub(crate) source: Option<LoadSource>,
}

impl LoadArgs {
    fn into_config(self) -> Result<LoadConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        LoadConfig::try_from(merged)
    }
}

/// Record sources the `load` command can drain.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize, Serialize,
)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum LoadSource {
    /// The delimited flight-records file.
    #[default]
    Csv,
    /// An existing relational database (not yet implemented).
    Database,
}

/// Resolved `load` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LoadConfig {
    /// Records file to read; present whenever the source is `csv`.
    pub(crate) flights_csv: Option<Utf8PathBuf>,
    /// SQLite database receiving the records.
    pub(crate) database: Utf8PathBuf,
    /// Selected record source.
    pub(crate) source: LoadSource,
}

impl LoadConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        if self.source == LoadSource::Csv {
            if let Some(path) = &self.flights_csv {
                Self::require_existing(path, ARG_FLIGHTS_CSV)?;
            }
        }
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<LoadArgs> for LoadConfig {
    type Error = CliError;

    fn try_from(args: LoadArgs) -> Result<Self, Self::Error> {
        let source = args.source.unwrap_or_default();
        let flights_csv = match source {
            LoadSource::Csv => Some(args.flights_csv.ok_or(CliError::MissingArgument {
                field: ARG_FLIGHTS_CSV,
                env: ENV_FLIGHTS_CSV,
            })?),
            LoadSource::Database => args.flights_csv,
        };
        let database = args
            .database
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATABASE));

        Ok(Self {
            flights_csv,
            database,
            source,
        })
    }
}

/// Return whether a path exists and is a regular file using capability-based
/// IO.
fn file_is_file(path: &Utf8Path) -> std::io::Result<bool> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let name = path
        .file_name()
        .ok_or_else(|| std::io::Error::other("path has no file name"))?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.metadata(name).map(|meta| meta.is_file())
}

/// Builds a loader instance for the current load invocation.
pub(super) trait LoadLoaderBuilder {
    /// Build the loader the resolved configuration selects.
    fn build(&self, config: &LoadConfig) -> Result<Box<dyn DataLoader>, CliError>;
}

pub(super) struct DefaultLoadLoaderBuilder;

impl LoadLoaderBuilder for DefaultLoadLoaderBuilder {
    fn build(&self, config: &LoadConfig) -> Result<Box<dyn DataLoader>, CliError> {
        match config.source {
            LoadSource::Csv => {
                let path = config.flights_csv.as_ref().ok_or(CliError::MissingArgument {
                    field: ARG_FLIGHTS_CSV,
                    env: ENV_FLIGHTS_CSV,
                })?;
                Ok(Box::new(CsvFlightLoader::new(path.clone())))
            }
            LoadSource::Database => Ok(Box::new(DatabaseLoader)),
        }
    }
}

pub(super) fn run_load(args: LoadArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultLoadLoaderBuilder;
    run_load_with(args, &builder, &mut stdout)
}

pub(super) fn run_load_with(
    args: LoadArgs,
    builder: &dyn LoadLoaderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let summary = execute_load(args, builder)?;
    write_summary(writer, &summary)
}

fn execute_load(
    args: LoadArgs,
    builder: &dyn LoadLoaderBuilder,
) -> Result<FlightIngestSummary, CliError> {
    let config = resolve_load_config(args)?;
    let loader = builder.build(&config)?;
    let mut store =
        SqliteDataStore::open(config.database.as_std_path()).map_err(|source| {
            CliError::OpenStore {
                path: config.database.clone(),
                source,
            }
        })?;
    Ok(loader.load(&mut store)?)
}

fn resolve_load_config(args: LoadArgs) -> Result<LoadConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn write_summary(writer: &mut dyn Write, summary: &FlightIngestSummary) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(summary).map_err(CliError::SerialiseSummary)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteSummary)?;
    writer.write_all(b"\n").map_err(CliError::WriteSummary)?;
    Ok(())
}
