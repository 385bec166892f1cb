//! Ingestion logic for the Flightline engine.
//!
//! Responsibilities:
//! - Define the loader seam ([`DataLoader`]) the CLI drives.
//! - Parse the delimited flight-records feed into core entities.
//! - Forward each reconstructed entity to a [`flightline_core::DataStore`].
//!
//! Boundaries:
//! - Do not encode domain rules (live in `flightline-core`).
//! - No uniqueness checks or retry logic; a malformed record aborts the
//!   load and key reconciliation is the store's concern.

#![forbid(unsafe_code)]

pub mod database;
pub mod ingest;
mod loader;

pub use database::DatabaseLoader;
pub use ingest::{
    CsvFlightLoader, FlightIngestError, FlightIngestSummary, RecordError, load_flights_csv,
};
pub use loader::DataLoader;
