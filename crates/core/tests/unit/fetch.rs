//! Fetch-stage contract against a mock trace source.

use mockall::Sequence;
use oosim_core::config::Config;
use oosim_core::pipeline::Pipeline;
use oosim_core::stats::ProcStats;
use oosim_core::trace::TraceRecord;

use crate::common::mocks::MockTrace;

fn record(address: u32) -> TraceRecord {
    TraceRecord {
        address,
        op_code: 0,
        dest: -1,
        src: [-1, -1],
    }
}

#[test]
fn test_fetch_pulls_up_to_width_and_stops_at_exhaustion() {
    // Fetch width 2 over a 3-record trace: two pulls in cycle 0, then one
    // record plus the end-of-trace pull in cycle 1. After the None the
    // source must never be polled again; any extra call fails the mock.
    let mut seq = Sequence::new();
    let mut trace = MockTrace::new();
    for i in 0..3u32 {
        trace
            .expect_next_record()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move || Ok(Some(record(0x1000 + i))));
    }
    trace
        .expect_next_record()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(None));

    let config = Config::with_pipeline(8, 1, 1, 1, 2);
    let mut pipeline = Pipeline::new(&config, trace);
    let mut stats = ProcStats::default();
    pipeline.run(&mut stats).unwrap();

    assert_eq!(stats.instructions_fetched, 3);
    assert_eq!(stats.retired_instructions, 3);
}
