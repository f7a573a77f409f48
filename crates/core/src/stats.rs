//! Simulation statistics collection and reporting.
//!
//! This module tracks throughput metrics for a run. It provides:
//! 1. **Raw counters:** Cycles, fetched/retired instructions, fired
//!    instructions, and dispatch-queue occupancy sums and peak.
//! 2. **Derived metrics:** Per-cycle retire/fire rates and average
//!    dispatch-queue length, all guarded against a zero cycle count.
//! 3. **Reporting:** A banner-style summary printed to stdout.

use std::time::Instant;

/// Statistics record filled in by [`Pipeline::run`](crate::pipeline::Pipeline::run).
#[derive(Clone, Debug)]
pub struct ProcStats {
    start_time: Instant,
    /// Index of the last simulated cycle in which any event occurred.
    pub cycle_count: u64,
    /// Instructions read from the trace.
    pub instructions_fetched: u64,
    /// Instructions retired.
    pub retired_instructions: u64,
    /// Instructions fired, summed over all cycles.
    pub total_fired: u64,
    /// Dispatch-queue length, summed over all cycles.
    pub total_dispatch_size: u64,
    /// Peak dispatch-queue length across the run.
    pub max_dispatch_size: u64,
}

impl Default for ProcStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycle_count: 0,
            instructions_fetched: 0,
            retired_instructions: 0,
            total_fired: 0,
            total_dispatch_size: 0,
            max_dispatch_size: 0,
        }
    }
}

impl ProcStats {
    /// Average instructions retired per cycle (IPC).
    pub fn avg_inst_retired(&self) -> f64 {
        self.retired_instructions as f64 / self.cycles_nonzero()
    }

    /// Average instructions fired per cycle.
    pub fn avg_inst_fired(&self) -> f64 {
        self.total_fired as f64 / self.cycles_nonzero()
    }

    /// Average dispatch-queue length per cycle.
    pub fn avg_disp_size(&self) -> f64 {
        self.total_dispatch_size as f64 / self.cycles_nonzero()
    }

    fn cycles_nonzero(&self) -> f64 {
        if self.cycle_count == 0 {
            1.0
        } else {
            self.cycle_count as f64
        }
    }

    /// Prints the statistics summary to stdout.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();
        println!("\n==========================================================");
        println!("OUT-OF-ORDER PIPELINE SIMULATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {:.4} s", seconds);
        println!("sim_cycles               {}", self.cycle_count);
        println!("sim_insts                {}", self.retired_instructions);
        println!("avg_inst_retired         {:.4}", self.avg_inst_retired());
        println!("avg_inst_fired           {:.4}", self.avg_inst_fired());
        println!("----------------------------------------------------------");
        println!("DISPATCH QUEUE");
        println!("  avg_disp_size          {:.4}", self.avg_disp_size());
        println!("  max_disp_size          {}", self.max_dispatch_size);
        println!("==========================================================");
    }
}
