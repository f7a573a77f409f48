//! State update stage: retire finished instructions.
//!
//! An entry retires once its result is visible: either already broadcast, or
//! sitting in the slice of the result FIFO that this cycle's broadcast phase
//! will drain. The latter models the half-cycle rule: the broadcast happens
//! in the first half of the same physical cycle, so retirement may observe
//! it even though the controller invokes this stage first.

use std::collections::HashSet;

use crate::common::Tag;
use crate::pipeline::inst::Inst;
use crate::pipeline::result_bus::ResultBus;
use crate::pipeline::station::ReservationStation;

/// Retires every eligible entry in `(completed_cycle, tag)` order, appending
/// to the retired log. Returns the number retired.
pub fn state_update_stage(
    station: &mut ReservationStation,
    bus: &ResultBus,
    retired: &mut Vec<Inst>,
    cycle: u64,
    trace: bool,
) -> u64 {
    let due: HashSet<Tag> = bus.due_this_cycle().collect();

    let mut ready: Vec<(u64, Tag)> = station
        .iter()
        .filter(|inst| {
            inst.completed && !inst.retired && (inst.result_broadcast || due.contains(&inst.tag))
        })
        .map(|inst| (inst.completed_cycle, inst.tag))
        .collect();
    ready.sort_unstable();

    let count = ready.len() as u64;
    for (_, tag) in ready {
        if let Some(mut inst) = station.remove(tag) {
            inst.retired = true;
            inst.state_update_cycle = cycle;
            if trace {
                eprintln!("SU  tag={} retire", tag);
            }
            retired.push(inst);
        }
    }
    count
}
