#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::State;

/// An airport referenced by a flight record.
///
/// The identifier is the feed's numeric airport code; the name is the
/// airport's display name. Each airport carries the [`State`] the record
/// attributed to it.
///
/// # Examples
/// ```
/// use flightline_core::{Airport, State};
///
/// let airport = Airport::new(11298, "Dallas/Fort Worth International", State::new("Texas"));
/// assert_eq!(airport.id, 11298);
/// assert_eq!(airport.state.name, "Texas");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Airport {
    /// Numeric airport identifier from the feed.
    pub id: u32,
    /// Display name of the airport.
    pub name: String,
    /// State the record attributed to this airport.
    pub state: State,
}

impl Airport {
    /// Construct an `Airport` from its identifier, name, and state.
    pub fn new(id: u32, name: impl Into<String>, state: State) -> Self {
        Self {
            id,
            name: name.into(),
            state,
        }
    }
}
