//! Driver-facing station orchestrator.
//!
//! `ServiceStation` owns the whole lifecycle: it builds the waiting area
//! and bay pool from validated configuration, runs pump workers on named
//! OS threads, spawns single-shot arrival threads with configurable pacing,
//! and turns the original design's fixed-duration timeout into explicit
//! cooperative shutdown — seal admissions, join producers, drain, join
//! workers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::config::StationConfig;
use crate::core::bays::BayPool;
use crate::core::error::StationError;
use crate::core::events::StationEvent;
use crate::core::pump::{arrival_run, pump_loop, PumpContext};
use crate::core::service::ServicePolicy;
use crate::core::vehicle::Vehicle;
use crate::core::waiting_area::WaitingArea;

/// Lock-free lifecycle counters shared by every station thread.
#[derive(Debug, Default)]
pub(crate) struct StationCounters {
    pub(crate) spawned: AtomicU64,
    pub(crate) admitted: AtomicU64,
    pub(crate) rejected: AtomicU64,
    pub(crate) serviced: AtomicU64,
    pub(crate) abandoned: AtomicU64,
}

/// Point-in-time snapshot of station activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationStats {
    /// Arrival threads spawned.
    pub spawned_arrivals: u64,
    /// Vehicles admitted into the waiting lane.
    pub admitted: u64,
    /// Vehicles turned away after shutdown was requested.
    pub rejected: u64,
    /// Vehicles fully serviced.
    pub serviced: u64,
    /// Vehicles dropped by workers when the bay gate was aborted.
    pub abandoned: u64,
    /// Vehicles currently resident in the lane.
    pub waiting: usize,
    /// Most vehicles ever resident at once.
    pub peak_waiting: usize,
    /// Bays currently checked out.
    pub bays_in_use: usize,
    /// Most bays ever checked out at once.
    pub peak_bays_in_use: usize,
}

/// Final outcome of a completed simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationReport {
    /// Counter snapshot taken after every thread joined.
    pub stats: StationStats,
    /// Lifecycle events in occurrence order.
    pub events: Vec<StationEvent>,
}

/// A running service station.
///
/// Construction spawns the pump workers immediately; arrivals are spawned
/// on demand. [`request_shutdown`](Self::request_shutdown) seals admissions,
/// and [`await_completion`](Self::await_completion) performs the full
/// join-and-drain sequence.
pub struct ServiceStation {
    area: Arc<WaitingArea>,
    bays: Arc<BayPool>,
    pacing: crate::config::ArrivalPacing,
    counters: Arc<StationCounters>,
    events_tx: Sender<StationEvent>,
    events_rx: Receiver<StationEvent>,
    pumps: Mutex<Vec<JoinHandle<()>>>,
    arrivals: Mutex<Vec<JoinHandle<()>>>,
    arrival_seq: AtomicU64,
}

impl ServiceStation {
    /// Builds a station from validated configuration and spawns its pump
    /// workers.
    ///
    /// Each component enforces its own bounds, so an out-of-range capacity
    /// or an empty pool is refused here even when the caller skipped
    /// [`StationConfig::validate`]; the builder layers full config
    /// validation on top.
    ///
    /// # Errors
    ///
    /// Returns [`StationError::CapacityOutOfRange`],
    /// [`StationError::NoBays`], or [`StationError::NoWorkers`] when a
    /// component bound is unusable.
    pub fn new(
        config: &StationConfig,
        policy: Arc<dyn ServicePolicy>,
    ) -> Result<Self, StationError> {
        if config.worker_count == 0 {
            return Err(StationError::NoWorkers);
        }

        let area = Arc::new(WaitingArea::new(config.waiting_capacity)?);
        let bays = Arc::new(BayPool::new(config.bay_count)?);
        let counters = Arc::new(StationCounters::default());
        let (events_tx, events_rx) = unbounded();

        let mut pumps = Vec::with_capacity(config.worker_count);
        for pump_id in 0..config.worker_count {
            let ctx = PumpContext {
                area: Arc::clone(&area),
                bays: Arc::clone(&bays),
                policy: Arc::clone(&policy),
                counters: Arc::clone(&counters),
                events: events_tx.clone(),
            };
            let handle = thread::Builder::new()
                .name(format!("pump-{pump_id}"))
                .spawn(move || pump_loop(pump_id, &ctx))
                .expect("failed to spawn pump thread");
            pumps.push(handle);
        }

        info!(
            waiting_capacity = config.waiting_capacity,
            bay_count = config.bay_count,
            worker_count = config.worker_count,
            "service station opened"
        );

        Ok(Self {
            area,
            bays,
            pacing: config.arrival_pacing.clone(),
            counters,
            events_tx,
            events_rx,
            pumps: Mutex::new(pumps),
            arrivals: Mutex::new(Vec::new()),
            arrival_seq: AtomicU64::new(0),
        })
    }

    /// Spawns one single-shot arrival thread for a vehicle named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`StationError::ShuttingDown`] once shutdown has been
    /// requested; no new producers start after that point.
    pub fn spawn_arrival(&self, name: &str) -> Result<(), StationError> {
        if self.area.is_sealed() {
            return Err(StationError::ShuttingDown);
        }
        let sequence = self.arrival_seq.fetch_add(1, Ordering::Relaxed) + 1;
        let vehicle = Vehicle::new(name, sequence);
        self.counters.spawned.fetch_add(1, Ordering::Relaxed);

        let area = Arc::clone(&self.area);
        let counters = Arc::clone(&self.counters);
        let events = self.events_tx.clone();
        let handle = thread::Builder::new()
            .name(format!("vehicle-{sequence}"))
            .spawn(move || arrival_run(vehicle, &area, &counters, &events))
            .expect("failed to spawn arrival thread");
        self.arrivals.lock().push(handle);
        Ok(())
    }

    /// Spawns a batch of arrivals, pausing between spawns according to the
    /// configured pacing policy.
    ///
    /// Stops early without error once shutdown is requested; returns the
    /// number of arrivals actually spawned.
    ///
    /// # Errors
    ///
    /// Propagates any error other than [`StationError::ShuttingDown`] from
    /// the individual spawns.
    pub fn spawn_arrivals<I, S>(&self, names: I) -> Result<usize, StationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut spawned = 0;
        for name in names {
            if spawned > 0 {
                let pause = self.pacing.delay();
                if !pause.is_zero() {
                    thread::sleep(pause);
                }
            }
            match self.spawn_arrival(&name.into()) {
                Ok(()) => spawned += 1,
                Err(StationError::ShuttingDown) => break,
                Err(other) => return Err(other),
            }
        }
        Ok(spawned)
    }

    /// Requests shutdown: the waiting area is sealed, so no new vehicle is
    /// admitted and blocked arrivals wake with a rejection.
    ///
    /// Already-queued vehicles stay eligible for service; use
    /// [`await_completion`](Self::await_completion) to drain them.
    /// Idempotent.
    pub fn request_shutdown(&self) {
        info!("shutdown requested; waiting area sealed");
        self.area.seal();
    }

    /// Blunt teardown: seals and closes the waiting area *and* shuts the
    /// bay gate, so workers blocked anywhere wake promptly.
    ///
    /// An in-flight timed service still runs to completion, and vehicles
    /// left in the lane stay there; they show up in the final stats as
    /// `waiting`.
    pub fn abort(&self) {
        info!("abort requested; closing waiting area and bay gate");
        self.area.seal();
        self.area.close();
        self.bays.close();
    }

    /// Joins every spawned thread and returns the final report.
    ///
    /// Sequence: join arrival threads (each terminates promptly — sealed
    /// areas reject, open areas drain), close the consumer side of the
    /// waiting area, join pump workers, then collect the ordered event log.
    /// Every vehicle admitted before shutdown has been serviced by the time
    /// this returns.
    pub fn await_completion(&self) -> StationReport {
        let arrivals: Vec<_> = {
            let mut guard = self.arrivals.lock();
            guard.drain(..).collect()
        };
        for handle in arrivals {
            if handle.join().is_err() {
                error!("arrival thread panicked");
            }
        }

        // All producers are done, so end-of-input is now exact.
        self.area.seal();
        self.area.close();

        let pumps: Vec<_> = {
            let mut guard = self.pumps.lock();
            guard.drain(..).collect()
        };
        for handle in pumps {
            if handle.join().is_err() {
                error!("pump thread panicked");
            }
        }

        let events: Vec<StationEvent> = self.events_rx.try_iter().collect();
        let stats = self.stats();
        info!(
            serviced = stats.serviced,
            rejected = stats.rejected,
            "simulation complete"
        );
        StationReport { stats, events }
    }

    /// Snapshot of the station's counters and gauges.
    #[must_use]
    pub fn stats(&self) -> StationStats {
        StationStats {
            spawned_arrivals: self.counters.spawned.load(Ordering::Relaxed),
            admitted: self.counters.admitted.load(Ordering::Relaxed),
            rejected: self.counters.rejected.load(Ordering::Relaxed),
            serviced: self.counters.serviced.load(Ordering::Relaxed),
            abandoned: self.counters.abandoned.load(Ordering::Relaxed),
            waiting: self.area.len(),
            peak_waiting: self.area.high_water_mark(),
            bays_in_use: self.bays.in_use(),
            peak_bays_in_use: self.bays.peak_in_use(),
        }
    }

    /// The shared waiting area, for direct inspection.
    #[must_use]
    pub fn waiting_area(&self) -> &WaitingArea {
        &self.area
    }

    /// The shared bay pool, for direct inspection.
    #[must_use]
    pub fn bay_pool(&self) -> &BayPool {
        &self.bays
    }
}

impl Drop for ServiceStation {
    fn drop(&mut self) {
        // Signal shutdown so detached workers exit instead of blocking
        // forever; joining belongs to await_completion, not Drop.
        self.area.seal();
        self.area.close();
    }
}
