//! Pipeline state machine: controller, stages, and shared resources.
//!
//! This module owns the whole simulated machine. It provides:
//! 1. **Controller:** [`Pipeline`] drives one cycle at a time, invoking the
//!    five stages in reverse pipeline order and collecting statistics.
//! 2. **Resources:** The reservation station, functional-unit pools, result
//!    buses, and register status table.
//! 3. **Half-cycle semantics:** Dispatch capacity is snapshotted before
//!    state update frees entries, and retirement may observe broadcasts
//!    scheduled for the same cycle's first half.

/// Instruction records and functional-unit classes.
pub mod inst;
/// Register status table (ready bits, producer tags).
pub mod regstatus;
/// Result-bus FIFO and broadcast history.
pub mod result_bus;
/// Stage functions.
pub mod stages;
/// Reservation station.
pub mod station;
/// Functional-unit pools.
pub mod units;

use std::collections::VecDeque;
use std::io;

use crate::common::{SimError, Tag};
use crate::config::{Config, FuRelease};
use crate::pipeline::inst::Inst;
use crate::pipeline::regstatus::RegStatusTable;
use crate::pipeline::result_bus::ResultBus;
use crate::pipeline::station::ReservationStation;
use crate::pipeline::units::FuPools;
use crate::stats::ProcStats;
use crate::trace::TraceSource;

/// How many stuck station tags a progress-stall error reports.
const STALL_REPORT_WINDOW: usize = 5;

/// The simulated out-of-order machine.
///
/// Owns every subsystem; all mutation happens from the stage calls inside
/// [`run`](Pipeline::run). The clock, tag counter, and broadcast history are
/// monotone across cycles.
pub struct Pipeline<S> {
    source: S,
    queue: VecDeque<Inst>,
    station: ReservationStation,
    units: FuPools,
    bus: ResultBus,
    regs: RegStatusTable,
    retired: Vec<Inst>,

    fetch_width: usize,
    fu_release: FuRelease,
    cycle_limit: u64,
    trace_stages: bool,

    cycle: u64,
    next_tag: u64,
    trace_done: bool,
}

impl<S: TraceSource> Pipeline<S> {
    /// Builds an idle machine from a configuration and a trace source.
    pub fn new(config: &Config, source: S) -> Self {
        let p = &config.pipeline;
        Self {
            source,
            queue: VecDeque::new(),
            station: ReservationStation::new(p.station_capacity()),
            units: FuPools::new(p.units_class0, p.units_class1, p.units_class2),
            bus: ResultBus::new(p.result_buses),
            regs: RegStatusTable::new(),
            retired: Vec::new(),
            fetch_width: p.fetch_width,
            fu_release: p.fu_release,
            cycle_limit: p.cycle_limit,
            trace_stages: config.general.trace_stages,
            cycle: 0,
            next_tag: 1,
            trace_done: false,
        }
    }

    /// Runs the simulation to completion, filling `stats`.
    ///
    /// Each iteration simulates one cycle: the station occupancy is
    /// snapshotted, then the stages run in reverse pipeline order so that
    /// data flows forward across cycles. The loop ends once the trace is
    /// exhausted and the queue, station, units, and result FIFO have all
    /// drained; `stats.cycle_count` is then the index of the last cycle in
    /// which anything happened. A machine that fails to drain within the
    /// configured cycle limit aborts with a diagnostic snapshot.
    pub fn run(&mut self, stats: &mut ProcStats) -> Result<(), SimError> {
        loop {
            // Half-cycle rule: dispatch may only use slots that were free
            // before this cycle's retirements.
            let slots_free = self.station.free_slots();

            let retired_now = stages::state_update::state_update_stage(
                &mut self.station,
                &self.bus,
                &mut self.retired,
                self.cycle,
                self.trace_stages,
            );
            let fired_now = stages::execute::execute_stage(
                &mut self.station,
                &mut self.units,
                &mut self.bus,
                &mut self.regs,
                self.fu_release,
                self.cycle,
                self.trace_stages,
            );
            stages::schedule::schedule_stage(&mut self.station, &self.bus, self.trace_stages);
            stages::dispatch::dispatch_stage(
                &mut self.queue,
                &mut self.station,
                &mut self.regs,
                slots_free,
                self.cycle,
                self.trace_stages,
            );
            let fetched_now = stages::fetch::fetch_stage(
                &mut self.source,
                &mut self.queue,
                &mut self.next_tag,
                &mut self.trace_done,
                self.fetch_width,
                self.cycle,
                self.trace_stages,
            )?;

            stats.retired_instructions += retired_now;
            stats.total_fired += fired_now;
            stats.instructions_fetched += fetched_now;
            stats.total_dispatch_size += self.queue.len() as u64;
            stats.max_dispatch_size = stats.max_dispatch_size.max(self.queue.len() as u64);

            if self.drained() {
                break;
            }
            self.cycle += 1;
            if self.cycle > self.cycle_limit {
                return Err(self.stall_error());
            }
        }
        stats.cycle_count = self.cycle;
        Ok(())
    }

    /// Current cycle.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Retired instructions, in retirement order.
    pub fn retired(&self) -> &[Inst] {
        &self.retired
    }

    /// Writes the per-instruction stage-entry table: one tab-separated row
    /// per retired instruction, ascending by tag.
    pub fn write_timing_log<W: io::Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "INST\tFETCH\tDISP\tSCHED\tEXEC\tSTATE")?;
        let mut rows: Vec<&Inst> = self.retired.iter().collect();
        rows.sort_unstable_by_key(|inst| inst.tag);
        for inst in rows {
            writeln!(
                w,
                "{}\t{}\t{}\t{}\t{}\t{}",
                inst.tag,
                inst.fetch_cycle,
                inst.dispatch_cycle,
                inst.schedule_cycle,
                inst.execute_cycle,
                inst.state_update_cycle
            )?;
        }
        Ok(())
    }

    /// Termination predicate: trace exhausted and every structure empty.
    fn drained(&self) -> bool {
        self.trace_done
            && self.queue.is_empty()
            && self.station.is_empty()
            && self.units.all_idle()
            && self.bus.is_empty()
    }

    /// Snapshot of the stuck machine for the progress-stall diagnostic.
    fn stall_error(&self) -> SimError {
        let stuck: Vec<Tag> = self
            .station
            .iter()
            .filter(|inst| !inst.completed)
            .map(|inst| inst.tag)
            .take(STALL_REPORT_WINDOW)
            .collect();
        SimError::ProgressStall {
            cycle: self.cycle,
            dispatch_queue_len: self.queue.len(),
            station_len: self.station.len(),
            result_bus_len: self.bus.len(),
            busy_units: self.units.busy_count(),
            stuck,
        }
    }
}
