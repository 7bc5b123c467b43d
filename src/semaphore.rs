//! Counting semaphore implementation.
//!
//! This module provides a blocking counting semaphore built on top of the
//! battle-tested `parking_lot` crate. The standard library offers no counting
//! semaphore for threads, so this one pairs a `parking_lot::Mutex` with a
//! `parking_lot::Condvar`, keeping the permit mutation and the blocking
//! decision under a single lock so a wakeup can never be lost.
//!
//! # Features
//!
//! - Blocking `acquire` and non-blocking `try_acquire`
//! - Cooperative cancellation via [`Semaphore::close`]
//! - Drain-aware acquisition for consumer-side shutdown
//! - Observable permit balance, negative while parties are blocked
//!
//! A cancelled waiter never consumes a permit: a thread woken by `close`
//! returns [`Closed`] and the permit count is left untouched, so shutdown
//! cannot leak capacity.
//!
//! # Examples
//!
//! ```
//! use forecourt::Semaphore;
//!
//! let sem = Semaphore::new(2);
//! assert!(sem.acquire().is_ok());
//! assert!(sem.acquire().is_ok());
//! assert_eq!(sem.permits(), 0);
//! sem.release();
//! assert_eq!(sem.permits(), 1);
//! ```
//!
//! Blocking handoff between threads:
//!
//! ```
//! use forecourt::Semaphore;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let sem = Arc::new(Semaphore::new(0));
//! let sem2 = Arc::clone(&sem);
//!
//! let waiter = thread::spawn(move || sem2.acquire().is_ok());
//!
//! // Grant the permit the waiter is blocked on.
//! sem.release();
//! assert!(waiter.join().unwrap());
//! ```

use parking_lot::{Condvar, Mutex};
use thiserror::Error;

/// Error returned when an acquisition is refused because the semaphore has
/// been closed.
///
/// Closure is a designed shutdown outcome, not a failure: callers use it to
/// exit their blocking loops cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("semaphore has been closed")]
pub struct Closed;

#[derive(Debug)]
struct PermitState {
    available: usize,
    waiters: usize,
    closed: bool,
}

/// A blocking, closeable counting semaphore.
///
/// The semaphore holds an integer permit balance. [`acquire`](Self::acquire)
/// blocks while no permits remain; [`release`](Self::release) returns a
/// permit and wakes one waiter if any are blocked. Wakeup selection among
/// blocked threads follows `parking_lot`'s internal queueing and carries no
/// strict FIFO guarantee.
#[derive(Debug)]
pub struct Semaphore {
    state: Mutex<PermitState>,
    wakeup: Condvar,
}

impl Semaphore {
    /// Creates a semaphore with `permits` initially available.
    #[must_use]
    pub const fn new(permits: usize) -> Self {
        Self {
            state: Mutex::new(PermitState {
                available: permits,
                waiters: 0,
                closed: false,
            }),
            wakeup: Condvar::new(),
        }
    }

    /// Acquires one permit, blocking until one is available.
    ///
    /// Fails fast with [`Closed`] once [`close`](Self::close) has been
    /// called, even when permits remain: a closed semaphore admits no new
    /// work. A waiter woken by closure returns without consuming a permit.
    ///
    /// # Errors
    ///
    /// Returns [`Closed`] if the semaphore is closed.
    pub fn acquire(&self) -> Result<(), Closed> {
        let mut state = self.state.lock();
        loop {
            if state.closed {
                return Err(Closed);
            }
            if state.available > 0 {
                state.available -= 1;
                return Ok(());
            }
            state.waiters += 1;
            self.wakeup.wait(&mut state);
            state.waiters -= 1;
        }
    }

    /// Acquires one permit, continuing to grant leftover permits after
    /// closure.
    ///
    /// This is the consumer-side drain primitive: closure marks the end of
    /// input, and the call keeps succeeding until every outstanding permit
    /// has been handed out. Only a closed *and* exhausted semaphore refuses.
    ///
    /// # Errors
    ///
    /// Returns [`Closed`] once the semaphore is closed and no permits remain.
    pub fn acquire_draining(&self) -> Result<(), Closed> {
        let mut state = self.state.lock();
        loop {
            if state.available > 0 {
                state.available -= 1;
                return Ok(());
            }
            if state.closed {
                return Err(Closed);
            }
            state.waiters += 1;
            self.wakeup.wait(&mut state);
            state.waiters -= 1;
        }
    }

    /// Attempts to acquire one permit without blocking.
    ///
    /// Returns `false` when no permit is available or the semaphore is
    /// closed.
    pub fn try_acquire(&self) -> bool {
        let mut state = self.state.lock();
        if state.closed || state.available == 0 {
            return false;
        }
        state.available -= 1;
        true
    }

    /// Returns one permit and wakes a single blocked waiter, if any.
    ///
    /// Releasing on a closed semaphore is permitted; draining acquirers can
    /// still collect the permit.
    pub fn release(&self) {
        let mut state = self.state.lock();
        state.available += 1;
        let blocked = state.waiters > 0;
        drop(state);
        if blocked {
            self.wakeup.notify_one();
        }
    }

    /// Closes the semaphore and wakes every blocked waiter.
    ///
    /// After closure, [`acquire`](Self::acquire) refuses immediately and
    /// [`acquire_draining`](Self::acquire_draining) refuses once the permit
    /// balance reaches zero. Idempotent.
    pub fn close(&self) {
        let mut state = self.state.lock();
        if state.closed {
            return;
        }
        state.closed = true;
        drop(state);
        self.wakeup.notify_all();
    }

    /// Whether [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Current logical permit balance.
    ///
    /// Negative values report contention: `-permits()` is the number of
    /// threads currently blocked in an acquire call.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn permits(&self) -> isize {
        let state = self.state.lock();
        state.available as isize - state.waiters as isize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_counting() {
        let sem = Semaphore::new(3);
        assert!(sem.acquire().is_ok());
        assert!(sem.acquire().is_ok());
        assert_eq!(sem.permits(), 1);
        sem.release();
        assert_eq!(sem.permits(), 2);
    }

    #[test]
    fn test_try_acquire_exhausted() {
        let sem = Semaphore::new(1);
        assert!(sem.try_acquire());
        assert!(!sem.try_acquire());
        sem.release();
        assert!(sem.try_acquire());
    }

    #[test]
    fn test_blocked_acquire_woken_by_release() {
        let sem = Arc::new(Semaphore::new(0));
        let sem2 = Arc::clone(&sem);

        let waiter = thread::spawn(move || sem2.acquire());

        // Give the waiter time to block, then observe the negative balance.
        thread::sleep(Duration::from_millis(20));
        assert_eq!(sem.permits(), -1);

        sem.release();
        assert!(waiter.join().unwrap().is_ok());
        assert_eq!(sem.permits(), 0);
    }

    #[test]
    fn test_close_wakes_all_waiters() {
        let sem = Arc::new(Semaphore::new(0));
        let mut handles = vec![];

        for _ in 0..4 {
            let sem = Arc::clone(&sem);
            handles.push(thread::spawn(move || sem.acquire()));
        }

        thread::sleep(Duration::from_millis(20));
        sem.close();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Err(Closed));
        }
    }

    #[test]
    fn test_cancelled_waiter_leaks_no_permit() {
        let sem = Arc::new(Semaphore::new(0));
        let sem2 = Arc::clone(&sem);

        let waiter = thread::spawn(move || sem2.acquire());
        thread::sleep(Duration::from_millis(20));
        sem.close();
        assert_eq!(waiter.join().unwrap(), Err(Closed));

        // The refused waiter must not have decremented the balance.
        assert_eq!(sem.permits(), 0);
    }

    #[test]
    fn test_acquire_refuses_after_close_even_with_permits() {
        let sem = Semaphore::new(2);
        sem.close();
        assert_eq!(sem.acquire(), Err(Closed));
        assert_eq!(sem.permits(), 2);
    }

    #[test]
    fn test_draining_takes_leftovers_then_refuses() {
        let sem = Semaphore::new(2);
        sem.close();
        assert!(sem.acquire_draining().is_ok());
        assert!(sem.acquire_draining().is_ok());
        assert_eq!(sem.acquire_draining(), Err(Closed));
    }

    #[test]
    fn test_release_after_close_reaches_draining_acquirer() {
        let sem = Arc::new(Semaphore::new(0));
        let sem2 = Arc::clone(&sem);

        sem.close();
        let drainer = thread::spawn(move || sem2.acquire_draining());
        // The drainer refuses immediately: closed and empty.
        assert_eq!(drainer.join().unwrap(), Err(Closed));

        sem.release();
        assert!(sem.acquire_draining().is_ok());
    }

    #[test]
    fn test_close_is_idempotent() {
        let sem = Semaphore::new(0);
        sem.close();
        sem.close();
        assert!(sem.is_closed());
    }

    #[test]
    fn test_many_threads_contending() {
        const THREADS: usize = 8;
        const ROUNDS: usize = 200;

        let sem = Arc::new(Semaphore::new(2));
        let mut handles = vec![];

        for _ in 0..THREADS {
            let sem = Arc::clone(&sem);
            handles.push(thread::spawn(move || {
                for _ in 0..ROUNDS {
                    sem.acquire().unwrap();
                    sem.release();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(sem.permits(), 2);
    }
}
