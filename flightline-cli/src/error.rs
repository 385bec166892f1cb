//! Error types emitted by the Flightline CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use flightline_core::SqliteDataStoreError;
use flightline_data::FlightIngestError;
use thiserror::Error;

/// Errors emitted by the Flightline CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name of the missing option.
        field: &'static str,
        /// Environment variable that can supply the option instead.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        /// Flag name of the offending option.
        field: &'static str,
        /// Path that was not found.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag name of the offending option.
        field: &'static str,
        /// Path that is not a regular file.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag name of the offending option.
        field: &'static str,
        /// Path that could not be inspected.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Opening or initialising the SQLite store failed.
    #[error("failed to open store at {path:?}: {source}")]
    OpenStore {
        /// Database path being opened.
        path: Utf8PathBuf,
        /// Failure reported by the store.
        #[source]
        source: SqliteDataStoreError,
    },
    /// The selected loader failed.
    #[error("failed to load flight records: {0}")]
    Load(#[from] FlightIngestError),
    /// Serialising the load summary failed.
    #[error("failed to serialise load summary: {0}")]
    SerialiseSummary(#[source] serde_json::Error),
    /// Writing the load summary failed.
    #[error("failed to write load summary: {0}")]
    WriteSummary(#[source] std::io::Error),
}
