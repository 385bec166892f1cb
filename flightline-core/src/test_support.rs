//! Test-only, in-memory `DataStore` implementation used by unit and
//! behaviour tests.

use crate::{Airport, Carrier, DataStore, Flight, State, StoreError};

/// In-memory `DataStore` that records every save call in arrival order.
///
/// The store performs no key reconciliation: saving the same state twice
/// yields two entries, which lets tests assert exactly what a loader
/// submitted.
#[derive(Default, Debug)]
pub struct MemoryStore {
    /// States in the order they were saved.
    pub states: Vec<State>,
    /// Airports in the order they were saved.
    pub airports: Vec<Airport>,
    /// Carriers in the order they were saved.
    pub carriers: Vec<Carrier>,
    /// Flights in the order they were saved.
    pub flights: Vec<Flight>,
}

impl MemoryStore {
    /// Total number of save calls the store has received.
    #[must_use]
    pub fn saved_entities(&self) -> usize {
        self.states.len() + self.airports.len() + self.carriers.len() + self.flights.len()
    }
}

impl DataStore for MemoryStore {
    fn save_state(&mut self, state: &State) -> Result<(), StoreError> {
        self.states.push(state.clone());
        Ok(())
    }

    fn save_airport(&mut self, airport: &Airport) -> Result<(), StoreError> {
        self.airports.push(airport.clone());
        Ok(())
    }

    fn save_carrier(&mut self, carrier: &Carrier) -> Result<(), StoreError> {
        self.carriers.push(carrier.clone());
        Ok(())
    }

    fn save_flight(&mut self, flight: &Flight) -> Result<(), StoreError> {
        self.flights.push(flight.clone());
        Ok(())
    }
}
