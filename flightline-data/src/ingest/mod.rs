//! CSV ingestion for the flight-records feed.
//!
//! The loader makes a single linear pass over the file: skip the header,
//! skip blank lines, and for every remaining line reconstruct the record's
//! entities and save each one through the store. There is no per-line
//! recovery; the first malformed field or failed save aborts the load.

use std::io::{BufRead, BufReader};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use flightline_core::{Airport, Carrier, DataStore, Flight, State, StoreError};
use serde::Serialize;
use thiserror::Error;

use crate::loader::DataLoader;

mod record;

pub use record::{FlightRecord, RecordError};

/// Counters describing one completed load.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FlightIngestSummary {
    /// Data lines parsed into records (header and blank lines excluded).
    pub records: u64,
    /// Blank lines skipped.
    pub blank_lines: u64,
    /// State save calls issued.
    pub states: u64,
    /// Airport save calls issued.
    pub airports: u64,
    /// Carrier save calls issued.
    pub carriers: u64,
    /// Flight save calls issued.
    pub flights: u64,
}

/// Errors returned when loading the flight-records feed.
#[derive(Debug, Error)]
pub enum FlightIngestError {
    /// Opening the records file failed.
    #[error("failed to open flight records at {path:?}")]
    Open {
        /// Path of the records file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Reading a line from the records file failed.
    #[error("failed to read flight records at {path:?} (line {line})")]
    Read {
        /// Path of the records file.
        path: Utf8PathBuf,
        /// 1-based line number being read.
        line: u64,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A record carried a malformed field.
    #[error("malformed record on line {line}")]
    Record {
        /// 1-based line number of the malformed record.
        line: u64,
        /// Field-level failure.
        #[source]
        source: RecordError,
    },
    /// The store rejected a save call.
    #[error("failed to store record on line {line}")]
    Store {
        /// 1-based line number of the record being saved.
        line: u64,
        /// Failure reported by the store.
        #[source]
        source: StoreError,
    },
}

/// Load a delimited flight-records file into `store`.
///
/// The first line is a header and is never parsed as data. Each data line
/// yields five save calls in feed order: state, origin airport, destination
/// airport, carrier, flight. Both airports share the record's single state
/// field, as the feed only carries one.
///
/// # Examples
/// ```no_run
/// use camino::Utf8Path;
/// use flightline_core::SqliteDataStore;
/// use flightline_data::load_flights_csv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut store = SqliteDataStore::open("flights.db")?;
/// let summary = load_flights_csv(Utf8Path::new("flights_small.csv"), &mut store)?;
/// println!("{} flights loaded", summary.flights);
/// # Ok(())
/// # }
/// ```
pub fn load_flights_csv(
    path: &Utf8Path,
    store: &mut dyn DataStore,
) -> Result<FlightIngestSummary, FlightIngestError> {
    let file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
        FlightIngestError::Open {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let reader = BufReader::new(file);

    let mut summary = FlightIngestSummary::default();
    let mut line_number: u64 = 0;

    for line in reader.lines() {
        line_number += 1;
        let line = line.map_err(|source| FlightIngestError::Read {
            path: path.to_path_buf(),
            line: line_number,
            source,
        })?;

        // The first line is the feed's column header.
        if line_number == 1 {
            continue;
        }
        if line.is_empty() {
            summary.blank_lines += 1;
            continue;
        }

        let record = FlightRecord::parse(&line);
        ingest_record(&record, store, &mut summary, line_number)?;
        summary.records += 1;
    }

    Ok(summary)
}

/// Reconstruct one record's entities and save them in feed order.
fn ingest_record(
    record: &FlightRecord<'_>,
    store: &mut dyn DataStore,
    summary: &mut FlightIngestSummary,
    line: u64,
) -> Result<(), FlightIngestError> {
    let as_record_error = |source| FlightIngestError::Record { line, source };
    let as_store_error = |source| FlightIngestError::Store { line, source };

    let state = State::new(record.state_name().map_err(as_record_error)?);
    store.save_state(&state).map_err(as_store_error)?;
    summary.states += 1;

    let origin = Airport::new(
        record.origin_id().map_err(as_record_error)?,
        record.origin_name().map_err(as_record_error)?,
        state.clone(),
    );
    store.save_airport(&origin).map_err(as_store_error)?;
    summary.airports += 1;

    let destination = Airport::new(
        record.destination_id().map_err(as_record_error)?,
        record.destination_name().map_err(as_record_error)?,
        state,
    );
    store.save_airport(&destination).map_err(as_store_error)?;
    summary.airports += 1;

    let carrier = Carrier::new(record.carrier_code().map_err(as_record_error)?);
    store.save_carrier(&carrier).map_err(as_store_error)?;
    summary.carriers += 1;

    let flight = Flight::new(
        record.number().map_err(as_record_error)?,
        record.date().map_err(as_record_error)?,
        origin,
        destination,
        carrier,
        record.departure_delay().map_err(as_record_error)?,
        record.arrival_delay().map_err(as_record_error)?,
        record.cancelled().map_err(as_record_error)?,
    );
    store.save_flight(&flight).map_err(as_store_error)?;
    summary.flights += 1;

    Ok(())
}

/// [`DataLoader`] that reads the delimited flight-records file at `path`.
#[derive(Debug, Clone)]
pub struct CsvFlightLoader {
    path: Utf8PathBuf,
}

impl CsvFlightLoader {
    /// Create a loader for the records file at `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the records file this loader reads.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl DataLoader for CsvFlightLoader {
    fn load(&self, store: &mut dyn DataStore) -> Result<FlightIngestSummary, FlightIngestError> {
        load_flights_csv(&self.path, store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightline_core::test_support::MemoryStore;
    use rstest::{fixture, rstest};
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str = "YEAR,QUARTER,FL_DATE,OP_UNIQUE_CARRIER,OP_CARRIER_FL_NUM,\
        ORIGIN_AIRPORT_ID,ORIGIN,ORIGIN_STATE_NM,DEST_AIRPORT_ID,DEST,DEST_STATE_NM,\
        CRS_DEP_TIME,DEP_DELAY,TAXI_OUT,WHEELS_OFF,CRS_ARR_TIME,ARR_DELAY,CANCELLED";
    const RECORD_AA: &str = "2019,1,01/15/19,AA,1587,11298,\
        Dallas/Fort Worth International,Texas,12892,Los Angeles International,\
        California,0900,-3,15,0915,1200,5,0";
    const RECORD_WN: &str = "2019,1,01/20/19,WN,44,10821,\
        Baltimore/Washington International,Maryland,13232,Chicago Midway International,\
        Illinois,0700,,10,0710,0930,,1";

    #[fixture]
    fn feed_dir() -> TempDir {
        TempDir::new().expect("create temp dir")
    }

    fn write_feed(dir: &TempDir, lines: &[&str]) -> Utf8PathBuf {
        let path = dir.path().join("flights_small.csv");
        fs::write(&path, lines.join("\n")).expect("write feed");
        Utf8PathBuf::from_path_buf(path).expect("utf-8 path")
    }

    #[rstest]
    fn loads_entities_in_feed_order(feed_dir: TempDir) {
        let path = write_feed(&feed_dir, &[HEADER, RECORD_AA]);
        let mut store = MemoryStore::default();

        let summary = load_flights_csv(&path, &mut store).expect("load feed");

        assert_eq!(summary.records, 1);
        assert_eq!(store.states, vec![State::new("Texas")]);
        assert_eq!(store.airports.len(), 2);
        assert_eq!(store.airports.first().map(|a| a.id), Some(11298));
        assert_eq!(store.airports.last().map(|a| a.id), Some(12892));
        assert_eq!(store.carriers, vec![Carrier::new("AA")]);
        assert_eq!(store.flights.len(), 1);
        let flight = store.flights.first().expect("one flight");
        assert_eq!(flight.number, "1587");
        assert_eq!(flight.departure_delay, -3);
        assert_eq!(flight.arrival_delay, 5);
        assert!(!flight.cancelled);
    }

    #[rstest]
    fn both_airports_share_the_record_state(feed_dir: TempDir) {
        let path = write_feed(&feed_dir, &[HEADER, RECORD_AA]);
        let mut store = MemoryStore::default();

        load_flights_csv(&path, &mut store).expect("load feed");

        // The feed carries a single state column; the destination inherits it.
        assert!(store.airports.iter().all(|a| a.state.name == "Texas"));
    }

    #[rstest]
    fn header_is_never_parsed_as_data(feed_dir: TempDir) {
        let path = write_feed(&feed_dir, &[HEADER]);
        let mut store = MemoryStore::default();

        let summary = load_flights_csv(&path, &mut store).expect("load header-only feed");

        assert_eq!(summary, FlightIngestSummary::default());
        assert_eq!(store.saved_entities(), 0);
    }

    #[rstest]
    fn blank_lines_are_skipped_and_counted(feed_dir: TempDir) {
        let path = write_feed(&feed_dir, &[HEADER, "", RECORD_AA, "", RECORD_WN]);
        let mut store = MemoryStore::default();

        let summary = load_flights_csv(&path, &mut store).expect("load feed");

        assert_eq!(summary.records, 2);
        assert_eq!(summary.blank_lines, 2);
        assert_eq!(summary.flights, 2);
    }

    #[rstest]
    fn missing_delays_default_to_zero(feed_dir: TempDir) {
        let path = write_feed(&feed_dir, &[HEADER, RECORD_WN]);
        let mut store = MemoryStore::default();

        load_flights_csv(&path, &mut store).expect("load feed");

        let flight = store.flights.first().expect("one flight");
        assert_eq!(flight.departure_delay, 0);
        assert_eq!(flight.arrival_delay, 0);
        assert!(flight.cancelled);
    }

    #[rstest]
    fn malformed_record_aborts_with_its_line_number(feed_dir: TempDir) {
        let bad = RECORD_WN.replace("13232", "MDW");
        let path = write_feed(&feed_dir, &[HEADER, RECORD_AA, &bad]);
        let mut store = MemoryStore::default();

        let error = load_flights_csv(&path, &mut store).expect_err("bad record should abort");

        match error {
            FlightIngestError::Record { line, source } => {
                assert_eq!(line, 3);
                assert!(matches!(
                    source,
                    RecordError::InvalidNumber {
                        field: "destination airport id",
                        ..
                    }
                ));
            }
            other => panic!("expected record error, got {other:?}"),
        }
        // The first record was fully saved before the abort.
        assert_eq!(store.flights.len(), 1);
    }

    #[rstest]
    fn nothing_after_the_failing_line_is_saved(feed_dir: TempDir) {
        let bad = RECORD_AA.replace("01/15/19", "2019-01-15");
        let path = write_feed(&feed_dir, &[HEADER, &bad, RECORD_WN]);
        let mut store = MemoryStore::default();

        let error = load_flights_csv(&path, &mut store).expect_err("bad date should abort");

        assert!(matches!(error, FlightIngestError::Record { line: 2, .. }));
        assert!(store.flights.is_empty());
    }

    #[rstest]
    fn store_failures_abort_the_load(feed_dir: TempDir) {
        struct RejectFlights;

        impl DataStore for RejectFlights {
            fn save_state(&mut self, _state: &State) -> Result<(), StoreError> {
                Ok(())
            }
            fn save_airport(&mut self, _airport: &Airport) -> Result<(), StoreError> {
                Ok(())
            }
            fn save_carrier(&mut self, _carrier: &Carrier) -> Result<(), StoreError> {
                Ok(())
            }
            fn save_flight(&mut self, _flight: &Flight) -> Result<(), StoreError> {
                Err(StoreError::new("flight", std::io::Error::other("disk full")))
            }
        }

        let path = write_feed(&feed_dir, &[HEADER, RECORD_AA]);
        let mut store = RejectFlights;

        let error = load_flights_csv(&path, &mut store).expect_err("store failure should abort");

        match error {
            FlightIngestError::Store { line, source } => {
                assert_eq!(line, 2);
                assert_eq!(source.entity(), "flight");
            }
            other => panic!("expected store error, got {other:?}"),
        }
    }

    #[rstest]
    fn missing_file_reports_the_path(feed_dir: TempDir) {
        let path = Utf8PathBuf::from_path_buf(feed_dir.path().join("missing.csv"))
            .expect("utf-8 path");
        let mut store = MemoryStore::default();

        let error = load_flights_csv(&path, &mut store).expect_err("missing file should fail");

        match error {
            FlightIngestError::Open { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected open error, got {other:?}"),
        }
    }

    #[rstest]
    fn csv_loader_delegates_to_the_path(feed_dir: TempDir) {
        let path = write_feed(&feed_dir, &[HEADER, RECORD_AA, RECORD_WN]);
        let loader = CsvFlightLoader::new(path.clone());
        assert_eq!(loader.path(), path);

        let mut store = MemoryStore::default();
        let summary = loader.load(&mut store).expect("load feed");

        assert_eq!(summary.records, 2);
        assert_eq!(summary.states, 2);
        assert_eq!(summary.airports, 4);
        assert_eq!(summary.carriers, 2);
        assert_eq!(summary.flights, 2);
    }
}
