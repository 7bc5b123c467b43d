//! # Forecourt
//!
//! Semaphore-based coordination primitives for bounded service-station
//! workloads.
//!
//! This library models the coordination between arriving vehicles and a
//! fixed pool of pump workers: arrivals queue in a size-limited waiting
//! area, workers pull vehicles out in arrival order, and a second gate
//! caps how many vehicles are actively being serviced at once. The same
//! three pieces — a counting semaphore, a bounded blocking buffer, and a
//! resource gate — compose into any bounded producer-consumer pipeline.
//!
//! ## Core Problem Solved
//!
//! Bounded coordination has three separate limits that are easy to
//! conflate:
//!
//! - **Waiting capacity**: how many work items may queue before producers
//!   must back off
//! - **Service concurrency**: how many items may be actively worked on,
//!   independent of how many worker threads exist
//! - **Lifecycle**: how to stop without stranding admitted work or
//!   truncating work in flight
//!
//! ## Key Features
//!
//! - **Counting semaphore**: blocking, closeable, leak-free under
//!   cancellation ([`Semaphore`])
//! - **Bounded waiting area**: classic two-semaphore bounded buffer with
//!   FIFO hand-off and backpressure ([`core::WaitingArea`])
//! - **Bay pool**: RAII-gated service concurrency limit
//!   ([`core::BayPool`])
//! - **Cooperative shutdown**: seal admissions, drain the queue, join the
//!   workers — never a fixed-duration timeout
//! - **Observable traces**: ordered lifecycle events plus lock-free
//!   counters for invariant checking
//!
//! ## Running a station
//!
//! ```
//! use forecourt::config::StationConfig;
//! use forecourt::core::{InstantService, ServiceStation};
//! use std::sync::Arc;
//!
//! let config = StationConfig {
//!     waiting_capacity: 3,
//!     worker_count: 2,
//!     ..StationConfig::default()
//! };
//! let station = ServiceStation::new(&config, Arc::new(InstantService)).unwrap();
//!
//! station.spawn_arrival("C1").unwrap();
//! station.spawn_arrival("C2").unwrap();
//!
//! let report = station.await_completion();
//! assert_eq!(report.stats.serviced, 2);
//! assert!(report.stats.peak_waiting <= 3);
//! ```
//!
//! For complete examples, see:
//! - `tests/station_flow_test.rs` - Full integration tests
//! - `tests/semaphore_tests.rs` - Primitive-level scenarios

#![deny(warnings)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Counting semaphore primitive; foundation for every higher component.
pub mod semaphore;
/// Core coordination components: waiting area, bay pool, workers, station.
pub mod core;
/// Configuration models for the station, pacing, and service times.
pub mod config;
/// Builders to construct station components from configuration.
pub mod builders;
/// Shared utilities.
pub mod util;

pub use semaphore::{Closed, Semaphore};
