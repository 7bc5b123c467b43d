//! Configuration models for the station, pacing, and service times.

pub mod station;

pub use station::{ArrivalPacing, ServiceTimeConfig, StationConfig};
