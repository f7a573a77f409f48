//! Execute stage: the three ordered first-half sub-phases.
//!
//! Within one call, mirroring the first half of a physical cycle:
//! 1. **Broadcast:** Drain up to the bus width from the result FIFO, waking
//!    dependents, releasing units, and updating the register status table.
//! 2. **Fire:** Move ready entries into free units of their class, lowest
//!    tag first.
//! 3. **Complete:** Tick down executing instructions; finished ones enqueue
//!    their result for a later broadcast. Under the default release policy
//!    their unit stays busy until that broadcast drains, so scarce bus
//!    bandwidth throttles further firings of the class.

use crate::common::Tag;
use crate::config::FuRelease;
use crate::pipeline::inst::OpClass;
use crate::pipeline::regstatus::RegStatusTable;
use crate::pipeline::result_bus::{BusEntry, ResultBus};
use crate::pipeline::stages::{operands_ready, EXEC_LATENCY};
use crate::pipeline::station::ReservationStation;
use crate::pipeline::units::{FuPools, FunctionalUnit};

/// Runs broadcast, fire, and complete for one cycle. Returns the number of
/// instructions fired.
pub fn execute_stage(
    station: &mut ReservationStation,
    units: &mut FuPools,
    bus: &mut ResultBus,
    regs: &mut RegStatusTable,
    release: FuRelease,
    cycle: u64,
    trace: bool,
) -> u64 {
    broadcast(station, units, bus, regs, trace);
    let fired = fire(station, units, bus, cycle, trace);
    complete(station, units, bus, release, cycle, trace);
    fired
}

/// Drains up to the bus width from the result FIFO, lowest tag first.
fn broadcast(
    station: &mut ReservationStation,
    units: &mut FuPools,
    bus: &mut ResultBus,
    regs: &mut RegStatusTable,
    trace: bool,
) {
    for _ in 0..bus.width() {
        let Some(entry) = bus.pop() else {
            break;
        };
        bus.record_broadcast(entry.tag);

        // The entry may have retired ahead of its broadcast; the unit is
        // therefore found by tag, not through the station.
        if let Some(inst) = station.get_mut(entry.tag) {
            inst.result_broadcast = true;
        }
        units.release(entry.tag);

        if let Some(dst) = entry.dst {
            regs.mark_ready(dst, entry.tag);
        }
        if trace {
            eprintln!("EX  tag={} broadcast dst={:?}", entry.tag, entry.dst);
        }
    }
}

/// Fires ready, unfired entries into free units of their class, lowest tag
/// first. Returns the number fired.
fn fire(
    station: &mut ReservationStation,
    units: &mut FuPools,
    bus: &ResultBus,
    cycle: u64,
    trace: bool,
) -> u64 {
    let mut candidates: Vec<(Tag, OpClass)> = station
        .iter()
        .filter(|inst| !inst.fired && (inst.ready_to_fire || operands_ready(inst, bus)))
        .map(|inst| (inst.tag, inst.class))
        .collect();
    candidates.sort_unstable_by_key(|&(tag, _)| tag);

    let mut fired = 0;
    for (tag, class) in candidates {
        let Some(fu_id) = units.allocate(class, tag, EXEC_LATENCY) else {
            continue;
        };
        if let Some(inst) = station.get_mut(tag) {
            inst.fired = true;
            inst.ready_to_fire = true;
            inst.execute_cycle = cycle;
            inst.fu_id = Some(fu_id);
            fired += 1;
            if trace {
                eprintln!("EX  tag={} fire {:?} unit={}", tag, class, fu_id);
            }
        }
    }
    fired
}

/// Ticks down executing instructions, lowest tag first; completions enqueue
/// their result on the bus FIFO.
fn complete(
    station: &mut ReservationStation,
    units: &mut FuPools,
    bus: &mut ResultBus,
    release: FuRelease,
    cycle: u64,
    trace: bool,
) {
    let mut executing: Vec<(Tag, OpClass, usize)> = station
        .iter()
        .filter(|inst| inst.fired && !inst.completed)
        .filter_map(|inst| inst.fu_id.map(|fu_id| (inst.tag, inst.class, fu_id)))
        .collect();
    executing.sort_unstable_by_key(|&(tag, _, _)| tag);

    for (tag, class, fu_id) in executing {
        let unit = units.unit_mut(class, fu_id);
        if unit.executing != Some(tag) {
            continue;
        }
        unit.latency_remaining = unit.latency_remaining.saturating_sub(1);
        if unit.latency_remaining > 0 {
            continue;
        }
        if release == FuRelease::Complete {
            *unit = FunctionalUnit::default();
        }

        if let Some(inst) = station.get_mut(tag) {
            inst.completed = true;
            inst.completed_cycle = cycle;
            bus.insert(BusEntry { tag, dst: inst.dst });
            if trace {
                eprintln!("EX  tag={} complete", tag);
            }
        }
    }
}
