use flightline_core::DataStore;

use crate::ingest::{FlightIngestError, FlightIngestSummary};

/// A source of flight records that can be drained into a store.
///
/// Implementations read their underlying source in one pass, saving each
/// reconstructed entity through `store` as it is produced. The CLI selects
/// an implementation per invocation, mirroring the loaders' shared shape.
pub trait DataLoader {
    /// Load every record from the source into `store`.
    fn load(&self, store: &mut dyn DataStore) -> Result<FlightIngestSummary, FlightIngestError>;
}
