#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A US state as named in the flight-records feed.
///
/// The feed carries the state as a display name ("Texas"), not a postal
/// abbreviation, and that name doubles as the entity key downstream.
///
/// # Examples
/// ```
/// use flightline_core::State;
///
/// let state = State::new("Texas");
/// assert_eq!(state.name, "Texas");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct State {
    /// Display name of the state.
    pub name: String,
}

impl State {
    /// Construct a `State` from its display name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
