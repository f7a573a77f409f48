//! Dispatch stage: move instructions from the dispatch queue into the
//! reservation station and resolve their producers.
//!
//! Source producer tags are captured BEFORE the destination claims the
//! register, so an instruction reading its own destination waits on the
//! previous writer, not on itself.

use std::collections::VecDeque;

use crate::pipeline::inst::Inst;
use crate::pipeline::regstatus::RegStatusTable;
use crate::pipeline::station::ReservationStation;

/// Admits up to `slots_free` instructions from the queue head in FIFO order.
/// Returns the number admitted.
///
/// `slots_free` is the station occupancy snapshotted at cycle start, before
/// state update ran: slots freed by this cycle's retirements only become
/// usable next cycle (the half-cycle rule).
pub fn dispatch_stage(
    queue: &mut VecDeque<Inst>,
    station: &mut ReservationStation,
    regs: &mut RegStatusTable,
    slots_free: usize,
    cycle: u64,
    trace: bool,
) -> u64 {
    let mut admitted = 0;
    while (admitted as usize) < slots_free {
        let Some(mut inst) = queue.pop_front() else {
            break;
        };

        inst.schedule_cycle = cycle + 1;

        for s in 0..inst.src.len() {
            inst.src_producer[s] = inst.src[s].and_then(|reg| regs.producer(reg));
        }

        let tag = inst.tag;
        let dst = inst.dst;
        let deps = inst.src_producer;
        if let Err(inst) = station.insert(inst) {
            // Station physically full; the entry stays at the queue head and
            // the register status table is left untouched.
            queue.push_front(inst);
            break;
        }
        if let Some(dst) = dst {
            regs.set_producer(dst, tag);
        }

        if trace {
            eprintln!("DI  tag={} deps=[{:?}, {:?}]", tag, deps[0], deps[1]);
        }
        admitted += 1;
    }
    admitted
}
