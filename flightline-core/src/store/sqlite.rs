//! SQLite-backed implementation of the [`DataStore`] seam.
#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use thiserror::Error;

use crate::{Airport, Carrier, Flight, State};

use super::{DataStore, StoreError};

/// Errors raised while opening or initialising the SQLite store.
#[derive(Debug, Error)]
pub enum SqliteDataStoreError {
    /// Failed to create the parent directory for the database file.
    #[error("failed to create parent directory {path:?}")]
    CreateDirectory {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path:?}")]
    Open {
        /// Destination database path.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Enabling SQLite foreign keys failed.
    #[error("failed to enable SQLite foreign keys")]
    ForeignKeys {
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Creating the entity tables failed.
    #[error("failed to create {table} table")]
    CreateSchema {
        /// Table whose creation failed.
        table: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
}

/// [`DataStore`] backed by a SQLite database on disk.
///
/// Keyed entities (states by name, airports by id, carriers by code) are
/// written with `INSERT OR IGNORE`, so repeated loads leave existing rows in
/// place. Flights carry no natural key in the feed and are appended; loading
/// the same file twice doubles the flight rows. Foreign keys are enforced,
/// which is why the loaders save a record's state and airports before its
/// flight.
///
/// # Examples
/// ```
/// use flightline_core::{DataStore, SqliteDataStore, State};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut store = SqliteDataStore::open_in_memory()?;
/// store.save_state(&State::new("Texas"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SqliteDataStore {
    connection: Connection,
}

impl SqliteDataStore {
    /// Open (creating if necessary) a store at the given database path.
    ///
    /// Parent directories are created automatically and the schema is
    /// initialised when missing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SqliteDataStoreError> {
        let path = path.as_ref();
        ensure_parent_dir(path)?;
        let connection =
            Connection::open(path).map_err(|source| SqliteDataStoreError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        Self::initialise(connection)
    }

    /// Open an in-memory store, primarily for tests.
    pub fn open_in_memory() -> Result<Self, SqliteDataStoreError> {
        let connection =
            Connection::open_in_memory().map_err(|source| SqliteDataStoreError::Open {
                path: PathBuf::from(":memory:"),
                source,
            })?;
        Self::initialise(connection)
    }

    fn initialise(connection: Connection) -> Result<Self, SqliteDataStoreError> {
        connection
            .pragma_update(None, "foreign_keys", true)
            .map_err(|source| SqliteDataStoreError::ForeignKeys { source })?;
        create_schema(&connection)?;
        Ok(Self { connection })
    }
}

fn ensure_parent_dir(path: &Path) -> Result<(), SqliteDataStoreError> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent == Path::new("/") {
        return Ok(());
    }
    std::fs::create_dir_all(parent).map_err(|source| SqliteDataStoreError::CreateDirectory {
        path: parent.to_path_buf(),
        source,
    })
}

fn create_schema(connection: &Connection) -> Result<(), SqliteDataStoreError> {
    let tables: [(&'static str, &str); 4] = [
        (
            "states",
            "CREATE TABLE IF NOT EXISTS states (name TEXT PRIMARY KEY)",
        ),
        (
            "airports",
            "CREATE TABLE IF NOT EXISTS airports (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                state TEXT NOT NULL REFERENCES states(name)
            )",
        ),
        (
            "carriers",
            "CREATE TABLE IF NOT EXISTS carriers (code TEXT PRIMARY KEY)",
        ),
        (
            "flights",
            "CREATE TABLE IF NOT EXISTS flights (
                id INTEGER PRIMARY KEY,
                number TEXT NOT NULL,
                date TEXT NOT NULL,
                origin INTEGER NOT NULL REFERENCES airports(id),
                destination INTEGER NOT NULL REFERENCES airports(id),
                carrier TEXT NOT NULL REFERENCES carriers(code),
                departure_delay INTEGER NOT NULL,
                arrival_delay INTEGER NOT NULL,
                cancelled INTEGER NOT NULL
            )",
        ),
    ];

    for (table, statement) in tables {
        connection
            .execute(statement, [])
            .map(|_| ())
            .map_err(|source| SqliteDataStoreError::CreateSchema { table, source })?;
    }
    Ok(())
}

impl DataStore for SqliteDataStore {
    fn save_state(&mut self, state: &State) -> Result<(), StoreError> {
        self.connection
            .prepare_cached("INSERT OR IGNORE INTO states (name) VALUES (?1)")
            .and_then(|mut statement| statement.execute([state.name.as_str()]))
            .map(|_| ())
            .map_err(|source| StoreError::new("state", source))
    }

    fn save_airport(&mut self, airport: &Airport) -> Result<(), StoreError> {
        self.connection
            .prepare_cached("INSERT OR IGNORE INTO airports (id, name, state) VALUES (?1, ?2, ?3)")
            .and_then(|mut statement| {
                statement.execute((
                    i64::from(airport.id),
                    airport.name.as_str(),
                    airport.state.name.as_str(),
                ))
            })
            .map(|_| ())
            .map_err(|source| StoreError::new("airport", source))
    }

    fn save_carrier(&mut self, carrier: &Carrier) -> Result<(), StoreError> {
        self.connection
            .prepare_cached("INSERT OR IGNORE INTO carriers (code) VALUES (?1)")
            .and_then(|mut statement| statement.execute([carrier.code.as_str()]))
            .map(|_| ())
            .map_err(|source| StoreError::new("carrier", source))
    }

    fn save_flight(&mut self, flight: &Flight) -> Result<(), StoreError> {
        self.connection
            .prepare_cached(
                "INSERT INTO flights (
                    number,
                    date,
                    origin,
                    destination,
                    carrier,
                    departure_delay,
                    arrival_delay,
                    cancelled
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )
            .and_then(|mut statement| {
                statement.execute((
                    flight.number.as_str(),
                    flight.date.to_string(),
                    i64::from(flight.origin.id),
                    i64::from(flight.destination.id),
                    flight.carrier.code.as_str(),
                    i64::from(flight.departure_delay),
                    i64::from(flight.arrival_delay),
                    i64::from(flight.cancelled),
                ))
            })
            .map(|_| ())
            .map_err(|source| StoreError::new("flight", source))
    }
}
