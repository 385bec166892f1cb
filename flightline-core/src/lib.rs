//! Core domain types for the Flightline ingestion engine.
//!
//! One flight record from the source feed reconstructs four entities: the
//! [`State`] named in the record, the origin and destination [`Airport`]s,
//! the operating [`Carrier`], and the [`Flight`] itself. Constructors are
//! plain; the feed is taken at face value and key reconciliation is left to
//! the [`DataStore`] implementation receiving the entities.

#![forbid(unsafe_code)]

mod airport;
mod carrier;
mod flight;
mod state;

pub mod store;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use airport::Airport;
pub use carrier::Carrier;
pub use flight::Flight;
pub use state::State;
pub use store::{DataStore, StoreError};

#[cfg(feature = "store-sqlite")]
pub use store::{SqliteDataStore, SqliteDataStoreError};
