//! Placeholder loader for a relational-database source.

use flightline_core::DataStore;
use log::warn;

use crate::ingest::{FlightIngestError, FlightIngestSummary};
use crate::loader::DataLoader;

/// [`DataLoader`] stub for loading records out of an existing database.
///
/// Database ingestion has not been implemented; selecting this source logs
/// a warning and reports an empty summary, leaving the store untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct DatabaseLoader;

impl DataLoader for DatabaseLoader {
    fn load(&self, _store: &mut dyn DataStore) -> Result<FlightIngestSummary, FlightIngestError> {
        // TODO: read records back out of a source database once a second
        // feed needs migrating.
        warn!("database loader selected; database ingestion is not implemented");
        Ok(FlightIngestSummary::default())
    }
}
