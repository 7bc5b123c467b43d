//! Bounded waiting area shared by arrivals and pump workers.
//!
//! The classic bounded-buffer construction: a `free_slots` semaphore counts
//! room to enqueue, a `queued` semaphore counts vehicles ready to dequeue,
//! and a `parking_lot::Mutex` guards the lane itself. A counting semaphore
//! is always acquired before the lane mutex and never the other way around,
//! and no scope holds more than one of the three at a time.
//!
//! Shutdown is staged. [`WaitingArea::seal`] closes the producer side: new
//! submissions are refused and blocked arrivals wake with their vehicle
//! handed back. [`WaitingArea::close`] marks end of input on the consumer
//! side: [`WaitingArea::take`] keeps draining queued vehicles and reports
//! `None` only once the lane is empty. Callers must not `close` while a
//! submission may still be in flight between its backpressure point and its
//! enqueue; the station guarantees this by joining arrival threads first.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use thiserror::Error;

use crate::core::error::StationError;
use crate::core::vehicle::Vehicle;
use crate::semaphore::Semaphore;

/// Smallest supported waiting-area capacity.
pub const MIN_CAPACITY: usize = 1;
/// Largest supported waiting-area capacity.
pub const MAX_CAPACITY: usize = 10;

/// A submission refused because the waiting area is sealed.
///
/// The vehicle is handed back to the caller, mirroring how a bounded
/// channel returns the rejected payload inside its send error.
#[derive(Debug, Error)]
#[error("waiting area is sealed; vehicle {} turned away", .0.name)]
pub struct Rejected(pub Vehicle);

/// Capacity-limited FIFO lane of vehicles awaiting service.
#[derive(Debug)]
pub struct WaitingArea {
    free_slots: Semaphore,
    queued: Semaphore,
    lane: Mutex<VecDeque<Vehicle>>,
    capacity: usize,
    high_water: AtomicUsize,
}

impl WaitingArea {
    /// Creates a waiting area holding at most `capacity` vehicles.
    ///
    /// # Errors
    ///
    /// Returns [`StationError::CapacityOutOfRange`] unless
    /// `capacity` is within `1..=10`.
    pub fn new(capacity: usize) -> Result<Self, StationError> {
        if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&capacity) {
            return Err(StationError::CapacityOutOfRange(capacity));
        }
        Ok(Self {
            free_slots: Semaphore::new(capacity),
            queued: Semaphore::new(0),
            lane: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            high_water: AtomicUsize::new(0),
        })
    }

    /// Submits a vehicle, blocking while the lane is full.
    ///
    /// This is the backpressure point: the caller suspends until a slot
    /// frees up. Returns the number of vehicles resident after the enqueue.
    ///
    /// # Errors
    ///
    /// Returns [`Rejected`] with the vehicle handed back once the area has
    /// been sealed.
    pub fn submit(&self, vehicle: Vehicle) -> Result<usize, Rejected> {
        if self.free_slots.acquire().is_err() {
            return Err(Rejected(vehicle));
        }
        tracing::debug!(vehicle = %vehicle, "slot granted; entering the lane");
        let resident = {
            let mut lane = self.lane.lock();
            lane.push_back(vehicle);
            lane.len()
        };
        self.high_water.fetch_max(resident, Ordering::Relaxed);
        self.queued.release();
        Ok(resident)
    }

    /// Takes the vehicle at the head of the lane, blocking while empty.
    ///
    /// Vehicles come out in the order they went in. Returns `None` once the
    /// area is closed and fully drained; the returned vehicle is owned
    /// exclusively by the caller from here on.
    pub fn take(&self) -> Option<Vehicle> {
        loop {
            self.queued.acquire_draining().ok()?;
            let vehicle = self.lane.lock().pop_front();
            match vehicle {
                Some(vehicle) => {
                    self.free_slots.release();
                    tracing::debug!(vehicle = %vehicle, "left the lane for service");
                    return Some(vehicle);
                }
                None => {
                    // A granted permit with an empty lane means the permit
                    // accounting and the lane have diverged.
                    debug_assert!(false, "queued permit granted but lane is empty");
                    tracing::error!("queued permit granted but lane is empty; permit counts desynchronized");
                }
            }
        }
    }

    /// Seals the producer side: no further submissions are admitted.
    ///
    /// Arrivals blocked at the backpressure point wake with [`Rejected`].
    /// Idempotent.
    pub fn seal(&self) {
        self.free_slots.close();
    }

    /// Marks end of input on the consumer side.
    ///
    /// [`take`](Self::take) drains what is left and then reports `None`.
    /// Call only once no submission is in flight. Idempotent.
    pub fn close(&self) {
        self.queued.close();
    }

    /// Whether [`seal`](Self::seal) has been called.
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.free_slots.is_closed()
    }

    /// Number of vehicles currently in the lane.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lane.lock().len()
    }

    /// Whether the lane is currently empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lane.lock().is_empty()
    }

    /// Configured maximum lane length.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most vehicles ever resident at once.
    #[must_use]
    pub fn high_water_mark(&self) -> usize {
        self.high_water.load(Ordering::Relaxed)
    }
}
