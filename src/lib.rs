//! Facade crate for the Flightline ingestion engine.
//!
//! This crate re-exports the core domain types and exposes the SQLite-backed
//! store implementation behind a feature flag.

#![forbid(unsafe_code)]

pub use flightline_core::{Airport, Carrier, DataStore, Flight, State, StoreError};

#[cfg(feature = "store-sqlite")]
pub use flightline_core::{SqliteDataStore, SqliteDataStoreError};
