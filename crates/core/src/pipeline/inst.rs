//! Instruction records flowing through the pipeline.

use crate::common::{ArchReg, Tag};
use crate::trace::TraceRecord;

/// Functional-unit class required by an instruction.
///
/// The trace's op code selects the class; the legacy op code of `-1` (and any
/// other unrecognised value) routes to class 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpClass {
    /// Class-0 unit pool.
    K0,
    /// Class-1 unit pool.
    K1,
    /// Class-2 unit pool.
    K2,
}

impl OpClass {
    /// All classes, in pool order.
    pub const ALL: [OpClass; 3] = [OpClass::K0, OpClass::K1, OpClass::K2];

    /// Maps a raw op code to its class.
    pub fn from_op_code(op_code: i32) -> OpClass {
        match op_code {
            0 => OpClass::K0,
            2 => OpClass::K2,
            _ => OpClass::K1,
        }
    }

    /// Pool index of this class.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            OpClass::K0 => 0,
            OpClass::K1 => 1,
            OpClass::K2 => 2,
        }
    }
}

/// An in-flight instruction: identity, stage-entry timing, and runtime state.
///
/// Created at fetch, moved into the reservation station at dispatch, and
/// finally appended to the retired log. Timing fields record the first cycle
/// the instruction existed in each stage.
#[derive(Clone, Debug)]
pub struct Inst {
    /// Unique, monotonically assigned identity.
    pub tag: Tag,
    /// Instruction address from the trace. Informational only.
    pub address: u32,
    /// Functional-unit class.
    pub class: OpClass,
    /// Source registers, `None` for "no register".
    pub src: [Option<ArchReg>; 2],
    /// Destination register, `None` for "no destination".
    pub dst: Option<ArchReg>,

    /// Cycle the instruction was fetched.
    pub fetch_cycle: u64,
    /// Cycle the dispatch stage first saw it (fetch + 1).
    pub dispatch_cycle: u64,
    /// Cycle the schedule stage first saw it.
    pub schedule_cycle: u64,
    /// Cycle it fired into a functional unit.
    pub execute_cycle: u64,
    /// Cycle it retired.
    pub state_update_cycle: u64,
    /// Cycle execution completed.
    pub completed_cycle: u64,

    /// Index of the unit executing it within its class pool.
    pub fu_id: Option<usize>,
    /// Producer tag per source; `None` means the value was already available
    /// at dispatch. The consumer waits for this specific writer's broadcast.
    pub src_producer: [Option<Tag>; 2],

    /// Both sources resolved; latched, never unset.
    pub ready_to_fire: bool,
    /// Holds a functional unit.
    pub fired: bool,
    /// Execution finished; result pending or broadcast.
    pub completed: bool,
    /// Result has been broadcast on a result bus.
    pub result_broadcast: bool,
    /// Removed from the reservation station.
    pub retired: bool,
}

impl Inst {
    /// Decodes a trace record fetched in `cycle` into a fresh instruction.
    ///
    /// Applies the op-code and register-sentinel coercions and stamps
    /// `dispatch_cycle = cycle + 1`: dispatch first examines the instruction
    /// the cycle after it is fetched.
    pub fn decode(record: &TraceRecord, tag: Tag, cycle: u64) -> Inst {
        Inst {
            tag,
            address: record.address,
            class: OpClass::from_op_code(record.op_code),
            src: [
                ArchReg::from_raw(record.src[0]),
                ArchReg::from_raw(record.src[1]),
            ],
            dst: ArchReg::from_raw(record.dest),
            fetch_cycle: cycle,
            dispatch_cycle: cycle + 1,
            schedule_cycle: 0,
            execute_cycle: 0,
            state_update_cycle: 0,
            completed_cycle: 0,
            fu_id: None,
            src_producer: [None, None],
            ready_to_fire: false,
            fired: false,
            completed: false,
            result_broadcast: false,
            retired: false,
        }
    }
}
