//! Arrival and pump-worker thread bodies.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread;

use crossbeam_channel::Sender;
use tracing::{debug, info, warn};

use crate::core::bays::BayPool;
use crate::core::events::StationEvent;
use crate::core::service::ServicePolicy;
use crate::core::station::StationCounters;
use crate::core::vehicle::Vehicle;
use crate::core::waiting_area::{Rejected, WaitingArea};

/// Shared handles a pump worker needs for its loop.
pub(crate) struct PumpContext {
    pub(crate) area: Arc<WaitingArea>,
    pub(crate) bays: Arc<BayPool>,
    pub(crate) policy: Arc<dyn ServicePolicy>,
    pub(crate) counters: Arc<StationCounters>,
    pub(crate) events: Sender<StationEvent>,
}

/// Consumer loop: take a vehicle, hold a bay, run the timed service.
///
/// Exits when the waiting area reports drained-and-closed, or when the bay
/// gate is shut under it (hard abort). The vehicle is owned by this thread
/// between take and service completion; it is never put back.
pub(crate) fn pump_loop(pump_id: usize, ctx: &PumpContext) {
    debug!(pump = pump_id, "pump worker started");
    loop {
        let Some(vehicle) = ctx.area.take() else {
            debug!(pump = pump_id, "waiting area drained; pump worker exiting");
            break;
        };
        let bay = match ctx.bays.checkout() {
            Ok(bay) => bay,
            Err(_closed) => {
                warn!(pump = pump_id, vehicle = %vehicle, "bay gate shut; abandoning vehicle");
                ctx.counters.abandoned.fetch_add(1, Ordering::Relaxed);
                break;
            }
        };

        let _ = ctx.events.send(StationEvent::ServiceStarted {
            pump: pump_id,
            name: vehicle.name.clone(),
            sequence: vehicle.sequence,
        });
        info!(pump = pump_id, vehicle = %vehicle, "service started");

        let wait = ctx.policy.service_time(&vehicle);
        if !wait.is_zero() {
            thread::sleep(wait);
        }

        ctx.counters.serviced.fetch_add(1, Ordering::Relaxed);
        let _ = ctx.events.send(StationEvent::ServiceFinished {
            pump: pump_id,
            name: vehicle.name.clone(),
            sequence: vehicle.sequence,
        });
        info!(pump = pump_id, vehicle = %vehicle, "service finished");
        drop(bay);
    }
    let _ = ctx.events.send(StationEvent::PumpStopped { pump: pump_id });
}

/// Producer body: submit one vehicle, record the outcome, terminate.
pub(crate) fn arrival_run(
    vehicle: Vehicle,
    area: &WaitingArea,
    counters: &StationCounters,
    events: &Sender<StationEvent>,
) {
    let _ = events.send(StationEvent::Arrived {
        id: vehicle.id,
        name: vehicle.name.clone(),
        sequence: vehicle.sequence,
    });
    info!(vehicle = %vehicle, "vehicle arrived");

    let name = vehicle.name.clone();
    let sequence = vehicle.sequence;
    match area.submit(vehicle) {
        Ok(resident) => {
            counters.admitted.fetch_add(1, Ordering::Relaxed);
            info!(vehicle = %name, resident, "vehicle entered the queue");
            let _ = events.send(StationEvent::Queued {
                name,
                sequence,
                resident,
            });
        }
        Err(Rejected(vehicle)) => {
            counters.rejected.fetch_add(1, Ordering::Relaxed);
            warn!(vehicle = %vehicle, "vehicle turned away; waiting area sealed");
            let _ = events.send(StationEvent::TurnedAway {
                name: vehicle.name,
                sequence: vehicle.sequence,
            });
        }
    }
}
