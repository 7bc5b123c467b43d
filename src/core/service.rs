//! Injectable service-time policies.
//!
//! The pump worker treats service as a timed wait whose duration comes from
//! a policy object, so tests substitute a deterministic policy while the
//! default draws from the same uniform range the simulated station uses.

use std::time::Duration;

use rand::Rng;

use crate::core::vehicle::Vehicle;

/// Decides how long servicing a given vehicle takes.
pub trait ServicePolicy: Send + Sync + 'static {
    /// Duration of the timed service wait for `vehicle`.
    fn service_time(&self, vehicle: &Vehicle) -> Duration;
}

/// Zero-duration service; the deterministic choice for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantService;

impl ServicePolicy for InstantService {
    fn service_time(&self, _vehicle: &Vehicle) -> Duration {
        Duration::ZERO
    }
}

/// Same fixed duration for every vehicle.
#[derive(Debug, Clone, Copy)]
pub struct FixedService(pub Duration);

impl ServicePolicy for FixedService {
    fn service_time(&self, _vehicle: &Vehicle) -> Duration {
        self.0
    }
}

/// Duration drawn uniformly from an inclusive millisecond range.
#[derive(Debug, Clone, Copy)]
pub struct UniformService {
    /// Lower bound of the service time.
    pub min: Duration,
    /// Upper bound of the service time.
    pub max: Duration,
}

impl Default for UniformService {
    /// The simulated station's 1–4 second service window.
    fn default() -> Self {
        Self {
            min: Duration::from_millis(1000),
            max: Duration::from_millis(4000),
        }
    }
}

impl ServicePolicy for UniformService {
    #[allow(clippy::cast_possible_truncation)]
    fn service_time(&self, _vehicle: &Vehicle) -> Duration {
        let lo = self.min.min(self.max).as_millis() as u64;
        let hi = self.min.max(self.max).as_millis() as u64;
        Duration::from_millis(rand::rng().random_range(lo..=hi))
    }
}
