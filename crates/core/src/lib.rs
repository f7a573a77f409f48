//! Out-of-order superscalar processor timing simulator.
//!
//! This crate simulates a pipelined out-of-order processor with Tomasulo-style
//! register renaming over a trace of decoded instructions. It provides:
//! 1. **Pipeline:** Five stages (fetch, dispatch, schedule, execute, state update)
//!    stepped one cycle at a time with explicit half-cycle event ordering.
//! 2. **Resources:** A bounded reservation station, per-class functional-unit
//!    pools, and a tag-ordered result-bus FIFO with bounded drain bandwidth.
//! 3. **Dependencies:** A register status table plus per-consumer producer tags,
//!    so WAR/WAW sequencing never wakes a consumer on the wrong writer.
//! 4. **Trace sources:** File and in-memory adapters for the decoded-trace format.
//! 5. **Statistics:** Per-run throughput metrics and a per-instruction
//!    stage-entry timing table.
//!
//! No instruction results are computed; only dependencies and timing matter.
//!
//! # Examples
//!
//! ```
//! use oosim_core::config::Config;
//! use oosim_core::pipeline::Pipeline;
//! use oosim_core::stats::ProcStats;
//! use oosim_core::trace::{TraceRecord, VecTrace};
//!
//! let trace = VecTrace::new(vec![TraceRecord {
//!     address: 0x100,
//!     op_code: 0,
//!     dest: 1,
//!     src: [-1, -1],
//! }]);
//! let config = Config::with_pipeline(8, 1, 1, 1, 2);
//! let mut pipeline = Pipeline::new(&config, trace);
//! let mut stats = ProcStats::default();
//! pipeline.run(&mut stats).unwrap();
//! assert_eq!(stats.cycle_count, 3);
//! assert_eq!(stats.retired_instructions, 1);
//! ```

/// Common types (tags, architectural registers, errors).
pub mod common;
/// Simulator configuration (defaults, pipeline parameters, release policy).
pub mod config;
/// Pipeline state machine (controller, stages, reservation station, units, buses).
pub mod pipeline;
/// Simulation statistics collection and reporting.
pub mod stats;
/// Trace sources (pull interface, file reader, in-memory adapter).
pub mod trace;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main simulator type; owns every pipeline subsystem.
pub use crate::pipeline::Pipeline;
/// Per-run statistics record.
pub use crate::stats::ProcStats;
