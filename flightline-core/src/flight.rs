use chrono::NaiveDate;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Airport, Carrier};

/// One flight event as reconstructed from a record of the feed.
///
/// Delays are minutes relative to schedule; negative values mean the flight
/// ran early. A cancelled flight still carries whatever delay fields the
/// feed reported (usually zero).
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use flightline_core::{Airport, Carrier, Flight, State};
///
/// let state = State::new("Texas");
/// let origin = Airport::new(11298, "Dallas/Fort Worth International", state.clone());
/// let destination = Airport::new(12892, "Los Angeles International", state);
/// let date = NaiveDate::from_ymd_opt(2019, 1, 15).expect("valid date");
/// let flight = Flight::new("1587", date, origin, destination, Carrier::new("AA"), -3, 5, false);
/// assert_eq!(flight.number, "1587");
/// assert!(!flight.cancelled);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Flight {
    /// Flight number as printed in the feed.
    pub number: String,
    /// Date the flight operated (or was scheduled to).
    pub date: NaiveDate,
    /// Airport the flight departed from.
    pub origin: Airport,
    /// Airport the flight arrived at.
    pub destination: Airport,
    /// Operating carrier.
    pub carrier: Carrier,
    /// Departure delay in minutes; negative when early.
    pub departure_delay: i32,
    /// Arrival delay in minutes; negative when early.
    pub arrival_delay: i32,
    /// Whether the flight was cancelled.
    pub cancelled: bool,
}

impl Flight {
    /// Construct a `Flight` from its parts.
    #[expect(
        clippy::too_many_arguments,
        reason = "constructor mirrors the eight fields of a feed record"
    )]
    pub fn new(
        number: impl Into<String>,
        date: NaiveDate,
        origin: Airport,
        destination: Airport,
        carrier: Carrier,
        departure_delay: i32,
        arrival_delay: i32,
        cancelled: bool,
    ) -> Self {
        Self {
            number: number.into(),
            date,
            origin,
            destination,
            carrier,
            departure_delay,
            arrival_delay,
            cancelled,
        }
    }
}
