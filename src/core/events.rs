//! Observable lifecycle events.
//!
//! Every arrival and service transition is recorded as a structured event
//! and delivered over the station's event channel in occurrence order, so
//! callers can assert trace properties instead of scraping log output.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One observable transition in the station's lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StationEvent {
    /// A vehicle reached the station and is about to request a slot.
    Arrived {
        /// Vehicle identifier.
        id: Uuid,
        /// Vehicle display name.
        name: String,
        /// Arrival order.
        sequence: u64,
    },
    /// A vehicle entered the waiting lane.
    Queued {
        /// Vehicle display name.
        name: String,
        /// Arrival order.
        sequence: u64,
        /// Vehicles resident in the lane after the enqueue.
        resident: usize,
    },
    /// A vehicle was turned away because the station is shutting down.
    TurnedAway {
        /// Vehicle display name.
        name: String,
        /// Arrival order.
        sequence: u64,
    },
    /// A pump began servicing a vehicle.
    ServiceStarted {
        /// Servicing pump worker id.
        pump: usize,
        /// Vehicle display name.
        name: String,
        /// Arrival order.
        sequence: u64,
    },
    /// A pump finished servicing a vehicle.
    ServiceFinished {
        /// Servicing pump worker id.
        pump: usize,
        /// Vehicle display name.
        name: String,
        /// Arrival order.
        sequence: u64,
    },
    /// A pump worker reached its terminal state.
    PumpStopped {
        /// Pump worker id.
        pump: usize,
    },
}
