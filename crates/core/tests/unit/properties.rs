//! Invariant and property tests over mixed traces.

use crate::common::harness::{Op, TestContext};
use oosim_core::common::{SimError, Tag};
use oosim_core::config::Config;

/// A small mixed trace: every class, RAW/WAR/WAW on r3, and a -1 op code.
const MIXED: &[Op] = &[
    (0, -1, -1, 3),
    (1, 3, -1, 4),
    (2, 3, 4, 5),
    (-1, 5, -1, 3),
    (0, -1, -1, 6),
    (2, 6, 3, 7),
    (1, -1, -1, 3),
    (0, 3, 7, 8),
];

#[test]
fn test_stage_cycles_monotone_per_instruction() {
    let mut ctx = TestContext::with_baseline(MIXED);
    ctx.run();

    for inst in ctx.pipeline.retired() {
        assert!(inst.fetch_cycle < inst.dispatch_cycle, "tag {}", inst.tag);
        assert!(
            inst.dispatch_cycle <= inst.schedule_cycle,
            "tag {}",
            inst.tag
        );
        assert!(inst.schedule_cycle <= inst.execute_cycle, "tag {}", inst.tag);
        assert!(
            inst.execute_cycle < inst.state_update_cycle,
            "tag {}",
            inst.tag
        );
    }
}

#[test]
fn test_run_is_deterministic() {
    let mut first = TestContext::with_baseline(MIXED);
    first.run();
    let mut second = TestContext::with_baseline(MIXED);
    second.run();

    assert_eq!(first.stats.cycle_count, second.stats.cycle_count);
    assert_eq!(
        first.stats.retired_instructions,
        second.stats.retired_instructions
    );
    assert_eq!(first.stats.total_fired, second.stats.total_fired);
    assert_eq!(
        first.stats.total_dispatch_size,
        second.stats.total_dispatch_size
    );
    assert_eq!(first.stats.max_dispatch_size, second.stats.max_dispatch_size);
    assert_eq!(first.timing_log(), second.timing_log());
}

#[test]
fn test_more_resources_never_cost_cycles() {
    let mut base = TestContext::with_baseline(MIXED);
    base.run();
    let base_cycles = base.stats.cycle_count;

    for config in [
        Config::with_pipeline(16, 1, 1, 1, 2),
        Config::with_pipeline(8, 2, 2, 2, 2),
        Config::with_pipeline(8, 1, 1, 1, 4),
        Config::with_pipeline(16, 4, 4, 4, 8),
    ] {
        let mut bigger = TestContext::new(config, MIXED);
        bigger.run();
        assert!(bigger.stats.cycle_count <= base_cycles);
    }
}

#[test]
fn test_every_fetched_instruction_retires() {
    let mut ctx = TestContext::with_baseline(MIXED);
    ctx.run();

    assert_eq!(ctx.stats.instructions_fetched, MIXED.len() as u64);
    assert_eq!(ctx.stats.retired_instructions, MIXED.len() as u64);
    assert_eq!(ctx.pipeline.retired().len(), MIXED.len());
}

#[test]
fn test_fire_rate_bounded_by_unit_count() {
    let mut ctx = TestContext::with_baseline(MIXED);
    ctx.run();

    // Three units total in the baseline machine
    assert!(ctx.stats.avg_inst_fired() <= 3.0);
}

#[test]
fn test_timing_log_is_tag_ordered() {
    let mut ctx = TestContext::with_baseline(MIXED);
    ctx.run();

    let log = ctx.timing_log();
    let mut lines = log.lines();
    assert_eq!(lines.next(), Some("INST\tFETCH\tDISP\tSCHED\tEXEC\tSTATE"));

    let tags: Vec<u64> = lines
        .map(|line| line.split('\t').next().unwrap().parse().unwrap())
        .collect();
    assert_eq!(tags.len(), MIXED.len());
    assert!(tags.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_starved_class_reports_progress_stall() {
    // Class 1 has no units: the instruction dispatches but can never fire
    let mut config = Config::with_pipeline(8, 1, 0, 1, 2);
    config.pipeline.cycle_limit = 200;

    let mut ctx = TestContext::new(config, &[(1, -1, -1, 1)]);
    let err = ctx.pipeline.run(&mut ctx.stats).unwrap_err();
    match err {
        SimError::ProgressStall {
            cycle,
            station_len,
            stuck,
            ..
        } => {
            assert!(cycle > 200);
            assert_eq!(station_len, 1);
            assert_eq!(stuck, vec![Tag(1)]);
        }
        other => panic!("expected progress stall, got {other}"),
    }
}
