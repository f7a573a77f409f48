//! Schedule stage: latch readiness flags for unfired station entries.
//!
//! Readiness is monotone (a producer's broadcast is never revoked), so the
//! flag is only ever set here, never cleared. The fire phase re-evaluates the
//! same predicate against the freshly updated broadcast history, which lets a
//! consumer fire in the very cycle its producer broadcasts; the latched flag
//! is the steady-state fast path.

use crate::pipeline::result_bus::ResultBus;
use crate::pipeline::stages::operands_ready;
use crate::pipeline::station::ReservationStation;

/// Recomputes `ready_to_fire` for every unfired station entry.
pub fn schedule_stage(station: &mut ReservationStation, bus: &ResultBus, trace: bool) {
    for inst in station.iter_mut() {
        if inst.fired || inst.ready_to_fire {
            continue;
        }
        if operands_ready(inst, bus) {
            inst.ready_to_fire = true;
            if trace {
                eprintln!("SC  tag={} ready", inst.tag);
            }
        }
    }
}
