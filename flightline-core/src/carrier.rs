#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An operating carrier identified by its reporting code.
///
/// The feed only carries the code ("AA", "DL"); mapping codes to display
/// names is a downstream concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Carrier {
    /// Reporting code of the carrier.
    pub code: String,
}

impl Carrier {
    /// Construct a `Carrier` from its reporting code.
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}
