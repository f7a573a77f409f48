//! Pipeline stage functions.
//!
//! One function per stage, each operating on the subsystems it borrows from
//! the controller. The controller invokes them in reverse pipeline order
//! (state update, execute, schedule, dispatch, fetch) so that within a cycle
//! each stage reads the state its upstream neighbour left behind in the
//! previous cycle.

pub mod dispatch;
pub mod execute;
pub mod fetch;
pub mod schedule;
pub mod state_update;

use crate::pipeline::inst::Inst;
use crate::pipeline::result_bus::ResultBus;

/// Execution latency in cycles for every instruction class.
pub(crate) const EXEC_LATENCY: u64 = 1;

/// Returns true if both of `inst`'s sources are resolved.
///
/// A source is resolved when it has no pending producer (including "no
/// register") or when that specific producer's result has been broadcast.
/// The register ready bits are deliberately not consulted here: under
/// write-after-write sequencing they can be set by an earlier writer than
/// the one this consumer captured at dispatch.
pub(crate) fn operands_ready(inst: &Inst, bus: &ResultBus) -> bool {
    inst.src_producer
        .iter()
        .all(|producer| producer.is_none_or(|tag| bus.has_broadcast(tag)))
}
