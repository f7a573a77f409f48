//! Fetch stage: pull decoded instructions from the trace into the dispatch queue.

use std::collections::VecDeque;

use crate::common::error::TraceError;
use crate::common::Tag;
use crate::pipeline::inst::Inst;
use crate::trace::TraceSource;

/// Pulls up to `width` records from the trace, assigning each a fresh tag
/// and stamping its fetch cycle. Returns the number fetched.
///
/// The dispatch queue is unbounded, so fetch only stops early when the trace
/// runs dry, which latches `trace_done` so the source is never polled again.
pub fn fetch_stage<S: TraceSource>(
    source: &mut S,
    queue: &mut VecDeque<Inst>,
    next_tag: &mut u64,
    trace_done: &mut bool,
    width: usize,
    cycle: u64,
    trace: bool,
) -> Result<u64, TraceError> {
    if *trace_done {
        return Ok(0);
    }

    let mut fetched = 0;
    for _ in 0..width {
        let record = match source.next_record()? {
            Some(record) => record,
            None => {
                *trace_done = true;
                break;
            }
        };

        let tag = Tag(*next_tag);
        *next_tag += 1;

        let inst = Inst::decode(&record, tag, cycle);
        if trace {
            eprintln!("FE  tag={} class={:?} dst={:?}", tag, inst.class, inst.dst);
        }
        queue.push_back(inst);
        fetched += 1;
    }
    Ok(fetched)
}
