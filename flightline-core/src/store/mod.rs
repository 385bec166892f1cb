//! Data access seam for reconstructed flight entities.
//!
//! The `DataStore` trait defines the save interface the loaders drive: one
//! call per entity per record, in record order. Implementations decide how
//! (and whether) duplicate keys across repeated loads are reconciled; the
//! loaders perform no uniqueness checks of their own.

use std::error::Error;

use thiserror::Error as ThisError;

use crate::{Airport, Carrier, Flight, State};

#[cfg(feature = "store-sqlite")]
mod sqlite;

#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqliteDataStore, SqliteDataStoreError};

/// Write access for the four entity kinds reconstructed from flight records.
///
/// Loaders call the save operations once per entity as each record is
/// parsed, so implementations see entities in feed order: state, origin
/// airport, destination airport, carrier, flight.
///
/// # Examples
///
/// ```rust
/// use flightline_core::{Airport, Carrier, DataStore, Flight, State, StoreError};
///
/// #[derive(Default)]
/// struct CountingStore {
///     saves: usize,
/// }
///
/// impl DataStore for CountingStore {
///     fn save_state(&mut self, _state: &State) -> Result<(), StoreError> {
///         self.saves += 1;
///         Ok(())
///     }
///     fn save_airport(&mut self, _airport: &Airport) -> Result<(), StoreError> {
///         self.saves += 1;
///         Ok(())
///     }
///     fn save_carrier(&mut self, _carrier: &Carrier) -> Result<(), StoreError> {
///         self.saves += 1;
///         Ok(())
///     }
///     fn save_flight(&mut self, _flight: &Flight) -> Result<(), StoreError> {
///         self.saves += 1;
///         Ok(())
///     }
/// }
///
/// let mut store = CountingStore::default();
/// store.save_state(&State::new("Texas"))?;
/// assert_eq!(store.saves, 1);
/// # Ok::<(), StoreError>(())
/// ```
pub trait DataStore {
    /// Persist a state.
    fn save_state(&mut self, state: &State) -> Result<(), StoreError>;

    /// Persist an airport.
    fn save_airport(&mut self, airport: &Airport) -> Result<(), StoreError>;

    /// Persist a carrier.
    fn save_carrier(&mut self, carrier: &Carrier) -> Result<(), StoreError>;

    /// Persist a flight.
    fn save_flight(&mut self, flight: &Flight) -> Result<(), StoreError>;
}

/// Error returned by [`DataStore`] save operations.
///
/// The type is deliberately opaque so the trait stays object-safe across
/// backends; the failing entity kind and the backend's own error are
/// preserved for reporting.
#[derive(Debug, ThisError)]
#[error("failed to save {entity}")]
pub struct StoreError {
    entity: &'static str,
    #[source]
    source: Box<dyn Error + Send + Sync>,
}

impl StoreError {
    /// Wrap a backend error, labelling the entity kind that failed to save.
    pub fn new(entity: &'static str, source: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self {
            entity,
            source: source.into(),
        }
    }

    /// Entity kind the failed save was persisting.
    #[must_use]
    pub fn entity(&self) -> &'static str {
        self.entity
    }
}
