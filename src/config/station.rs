//! Station configuration structures.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::service::{FixedService, InstantService, ServicePolicy, UniformService};
use crate::core::waiting_area::{MAX_CAPACITY, MIN_CAPACITY};

/// Pause policy between consecutive arrival spawns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrivalPacing {
    /// Spawn arrivals back to back.
    Immediate,
    /// Fixed pause between arrivals.
    Fixed {
        /// Pause in milliseconds.
        millis: u64,
    },
    /// Pause drawn uniformly from an inclusive millisecond range.
    Uniform {
        /// Lower bound in milliseconds.
        min_millis: u64,
        /// Upper bound in milliseconds.
        max_millis: u64,
    },
}

impl ArrivalPacing {
    /// Samples the next inter-arrival pause.
    #[must_use]
    pub fn delay(&self) -> Duration {
        match self {
            Self::Immediate => Duration::ZERO,
            Self::Fixed { millis } => Duration::from_millis(*millis),
            Self::Uniform {
                min_millis,
                max_millis,
            } => {
                let lo = (*min_millis).min(*max_millis);
                let hi = (*min_millis).max(*max_millis);
                Duration::from_millis(rand::rng().random_range(lo..=hi))
            }
        }
    }
}

/// Service-time selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceTimeConfig {
    /// Zero-duration service, for deterministic runs.
    Instant,
    /// Fixed service time.
    Fixed {
        /// Service time in milliseconds.
        millis: u64,
    },
    /// Service time drawn uniformly from an inclusive millisecond range.
    Uniform {
        /// Lower bound in milliseconds.
        min_millis: u64,
        /// Upper bound in milliseconds.
        max_millis: u64,
    },
}

impl ServiceTimeConfig {
    /// Builds the service policy this selection describes.
    #[must_use]
    pub fn policy(&self) -> Arc<dyn ServicePolicy> {
        match self {
            Self::Instant => Arc::new(InstantService),
            Self::Fixed { millis } => Arc::new(FixedService(Duration::from_millis(*millis))),
            Self::Uniform {
                min_millis,
                max_millis,
            } => Arc::new(UniformService {
                min: Duration::from_millis(*min_millis),
                max: Duration::from_millis(*max_millis),
            }),
        }
    }
}

/// Station configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationConfig {
    /// Waiting-lane capacity; must stay within `1..=10`.
    pub waiting_capacity: usize,
    /// Number of service bays.
    pub bay_count: usize,
    /// Number of pump worker threads.
    pub worker_count: usize,
    /// Pause policy between arrival spawns.
    pub arrival_pacing: ArrivalPacing,
    /// Service-time selection.
    pub service_time: ServiceTimeConfig,
}

impl Default for StationConfig {
    /// The simulated station's defaults: a five-slot lane, two bays, one
    /// worker per CPU, half-second arrival spacing, one-to-four-second
    /// service.
    fn default() -> Self {
        Self {
            waiting_capacity: 5,
            bay_count: 2,
            worker_count: num_cpus::get().max(1),
            arrival_pacing: ArrivalPacing::Fixed { millis: 500 },
            service_time: ServiceTimeConfig::Uniform {
                min_millis: 1000,
                max_millis: 4000,
            },
        }
    }
}

impl StationConfig {
    /// Validate station configuration values.
    ///
    /// # Errors
    ///
    /// Returns a description of the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&self.waiting_capacity) {
            return Err(format!(
                "waiting_capacity must be within {MIN_CAPACITY}..={MAX_CAPACITY}, got {}",
                self.waiting_capacity
            ));
        }
        if self.bay_count == 0 {
            return Err("bay_count must be greater than 0".into());
        }
        if self.worker_count == 0 {
            return Err("worker_count must be greater than 0".into());
        }
        if let ArrivalPacing::Uniform {
            min_millis,
            max_millis,
        } = self.arrival_pacing
        {
            if min_millis > max_millis {
                return Err("arrival_pacing range must satisfy min <= max".into());
            }
        }
        if let ServiceTimeConfig::Uniform {
            min_millis,
            max_millis,
        } = self.service_time
        {
            if min_millis > max_millis {
                return Err("service_time range must satisfy min <= max".into());
            }
        }
        Ok(())
    }

    /// Parse station configuration from a JSON string and validate.
    ///
    /// # Errors
    ///
    /// Returns a parse or validation description.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
