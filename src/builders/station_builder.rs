//! Builders to construct a service station from configuration.

use crate::config::StationConfig;
use crate::core::error::StationError;
use crate::core::station::ServiceStation;

/// Build a running station from configuration, deriving the service policy
/// from the configured service-time selection.
///
/// # Errors
///
/// Returns [`StationError::InvalidConfig`] when validation fails, or any
/// construction error from [`ServiceStation::new`].
pub fn build_station(cfg: &StationConfig) -> Result<ServiceStation, StationError> {
    cfg.validate().map_err(StationError::InvalidConfig)?;
    ServiceStation::new(cfg, cfg.service_time.policy())
}
