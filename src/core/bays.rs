//! Service-bay gate limiting concurrent active service.
//!
//! A plain counting semaphore used purely for admission: check out a bay
//! before servicing, release it afterwards. The gate is independent of the
//! waiting area — it caps concurrent *service* while the area caps
//! concurrent *waiting*. A worker that has taken a vehicle but not yet
//! checked out a bay holds that vehicle exclusively; it lives in neither
//! structure during the stall.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::core::error::StationError;
use crate::semaphore::{Closed, Semaphore};

/// Fixed pool of service bays.
#[derive(Debug)]
pub struct BayPool {
    gate: Semaphore,
    bay_count: usize,
    in_use: AtomicUsize,
    peak: AtomicUsize,
}

/// Exclusive hold on one service bay.
///
/// The bay returns to the pool when the guard drops.
#[derive(Debug)]
pub struct BayGuard<'a> {
    pool: &'a BayPool,
}

impl Drop for BayGuard<'_> {
    fn drop(&mut self) {
        self.pool.in_use.fetch_sub(1, Ordering::Relaxed);
        self.pool.gate.release();
    }
}

impl BayPool {
    /// Creates a pool of `bay_count` bays.
    ///
    /// # Errors
    ///
    /// Returns [`StationError::NoBays`] when `bay_count` is zero.
    pub fn new(bay_count: usize) -> Result<Self, StationError> {
        if bay_count == 0 {
            return Err(StationError::NoBays);
        }
        Ok(Self {
            gate: Semaphore::new(bay_count),
            bay_count,
            in_use: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        })
    }

    /// Checks out a bay, blocking until one is free.
    ///
    /// # Errors
    ///
    /// Returns [`Closed`] once the gate has been shut.
    pub fn checkout(&self) -> Result<BayGuard<'_>, Closed> {
        self.gate.acquire()?;
        let now = self.in_use.fetch_add(1, Ordering::Relaxed) + 1;
        self.peak.fetch_max(now, Ordering::Relaxed);
        Ok(BayGuard { pool: self })
    }

    /// Shuts the gate, waking blocked checkouts.
    ///
    /// Used by hard abort only; a graceful drain never needs it because
    /// every bay wait resolves as in-flight services finish.
    pub fn close(&self) {
        self.gate.close();
    }

    /// Number of bays in the pool.
    #[must_use]
    pub const fn bay_count(&self) -> usize {
        self.bay_count
    }

    /// Bays currently checked out.
    #[must_use]
    pub fn in_use(&self) -> usize {
        self.in_use.load(Ordering::Relaxed)
    }

    /// Most bays ever checked out at once.
    #[must_use]
    pub fn peak_in_use(&self) -> usize {
        self.peak.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_zero_bays_is_a_construction_error() {
        assert!(matches!(BayPool::new(0), Err(StationError::NoBays)));
    }

    #[test]
    fn test_checkout_and_release_on_drop() {
        let pool = BayPool::new(2).unwrap();
        let first = pool.checkout().unwrap();
        let second = pool.checkout().unwrap();
        assert_eq!(pool.in_use(), 2);

        drop(first);
        assert_eq!(pool.in_use(), 1);
        drop(second);
        assert_eq!(pool.in_use(), 0);
        assert_eq!(pool.peak_in_use(), 2);
    }

    #[test]
    fn test_blocked_checkout_woken_by_release() {
        let pool = Arc::new(BayPool::new(1).unwrap());
        let held = pool.checkout().unwrap();

        let pool2 = Arc::clone(&pool);
        let waiter = thread::spawn(move || {
            let bay = pool2.checkout();
            bay.is_ok()
        });

        thread::sleep(Duration::from_millis(20));
        drop(held);
        assert!(waiter.join().unwrap());
    }

    #[test]
    fn test_close_refuses_blocked_checkout() {
        let pool = Arc::new(BayPool::new(1).unwrap());
        let held = pool.checkout().unwrap();

        let pool2 = Arc::clone(&pool);
        let waiter = thread::spawn(move || pool2.checkout().map(|_| ()));

        thread::sleep(Duration::from_millis(20));
        pool.close();

        assert_eq!(waiter.join().unwrap(), Err(Closed));
        drop(held);
        // Fail-fast: a freed bay is still refused once the gate is shut.
        assert!(pool.checkout().is_err());
    }
}
