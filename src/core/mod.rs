//! Core coordination components: waiting area, bay pool, workers, station.

pub mod bays;
pub mod error;
pub mod events;
mod pump;
pub mod service;
pub mod station;
pub mod vehicle;
pub mod waiting_area;

pub use bays::{BayGuard, BayPool};
pub use error::{AppResult, StationError};
pub use events::StationEvent;
pub use service::{FixedService, InstantService, ServicePolicy, UniformService};
pub use station::{ServiceStation, StationReport, StationStats};
pub use vehicle::Vehicle;
pub use waiting_area::{Rejected, WaitingArea, MAX_CAPACITY, MIN_CAPACITY};
