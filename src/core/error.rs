//! Error types for station construction and admission.

use thiserror::Error;

/// Errors produced when constructing or driving a service station.
#[derive(Debug, Error)]
pub enum StationError {
    /// Waiting-area capacity is outside the supported range.
    #[error("waiting area capacity {0} is outside the supported range 1..=10")]
    CapacityOutOfRange(usize),
    /// A station needs at least one service bay.
    #[error("bay count must be at least 1")]
    NoBays,
    /// A station needs at least one pump worker.
    #[error("worker count must be at least 1")]
    NoWorkers,
    /// Configuration validation failed with context.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Shutdown has been requested; no new arrivals may start.
    #[error("station is shutting down")]
    ShuttingDown,
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
