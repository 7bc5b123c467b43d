//! The work item flowing through the station.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A vehicle queued for service.
///
/// Identity is immutable once created. Ownership moves with the vehicle:
/// the arrival that created it hands it to the waiting area, the pump
/// worker that dequeues it holds it exclusively until service completes,
/// and it is dropped afterwards. A vehicle is never re-inserted into a
/// shared structure once taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Unique vehicle identifier.
    pub id: Uuid,
    /// Display name, e.g. `"C3"`.
    pub name: String,
    /// Arrival order assigned by the station, starting at 1.
    pub sequence: u64,
}

impl Vehicle {
    /// Creates a vehicle with a fresh identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, sequence: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            sequence,
        }
    }
}

impl std::fmt::Display for Vehicle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.name, self.sequence)
    }
}
