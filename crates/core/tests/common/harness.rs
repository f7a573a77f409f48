use oosim_core::common::Tag;
use oosim_core::config::Config;
use oosim_core::pipeline::Pipeline;
use oosim_core::pipeline::inst::Inst;
use oosim_core::stats::ProcStats;
use oosim_core::trace::{TraceRecord, VecTrace};

/// `(op, src0, src1, dst)` tuple shorthand for building traces.
pub type Op = (i32, i32, i32, i32);

pub struct TestContext {
    pub pipeline: Pipeline<VecTrace>,
    pub stats: ProcStats,
}

impl TestContext {
    pub fn new(config: Config, ops: &[Op]) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let records = ops
            .iter()
            .enumerate()
            .map(|(i, &(op, src0, src1, dst))| TraceRecord {
                address: 0x1000 + 4 * i as u32,
                op_code: op,
                dest: dst,
                src: [src0, src1],
            })
            .collect();

        Self {
            pipeline: Pipeline::new(&config, VecTrace::new(records)),
            stats: ProcStats::default(),
        }
    }

    /// Baseline used by the end-to-end scenarios: R=8, one unit per class,
    /// fetch width 2 (station capacity 6).
    pub fn with_baseline(ops: &[Op]) -> Self {
        Self::new(Config::with_pipeline(8, 1, 1, 1, 2), ops)
    }

    /// Runs the simulation to completion; results land in `self.stats`.
    pub fn run(&mut self) {
        self.pipeline
            .run(&mut self.stats)
            .expect("simulation failed");
    }

    /// Retired instruction with the given tag.
    pub fn retired_tag(&self, tag: u64) -> &Inst {
        self.pipeline
            .retired()
            .iter()
            .find(|inst| inst.tag == Tag(tag))
            .expect("tag not retired")
    }

    /// Stage-entry row `(fetch, disp, sched, exec, state)` for a retired tag.
    pub fn timing(&self, tag: u64) -> (u64, u64, u64, u64, u64) {
        let inst = self.retired_tag(tag);
        (
            inst.fetch_cycle,
            inst.dispatch_cycle,
            inst.schedule_cycle,
            inst.execute_cycle,
            inst.state_update_cycle,
        )
    }

    /// The timing table as the CLI would print it.
    pub fn timing_log(&self) -> String {
        let mut out = Vec::new();
        self.pipeline
            .write_timing_log(&mut out)
            .expect("write timing log");
        String::from_utf8(out).expect("timing log is utf-8")
    }
}
