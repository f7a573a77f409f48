//! Error types for trace input and simulation failures.
//!
//! All errors are fatal: a trace that cannot be opened or parsed stops the
//! run before it starts, and a pipeline that stops making forward progress
//! aborts with a diagnostic snapshot.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::reg::Tag;

/// Failure while opening or reading the instruction trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace file could not be opened.
    #[error("failed to open trace {path}: {source}")]
    Open {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// An I/O error occurred while reading trace records.
    #[error("failed to read trace: {0}")]
    Read(#[from] io::Error),

    /// A trace line did not match the record format.
    #[error("malformed trace record at line {line_no}: {line:?}")]
    Malformed {
        /// 1-based line number of the offending record.
        line_no: usize,
        /// The raw line content.
        line: String,
    },
}

/// Fatal simulation error.
#[derive(Debug, Error)]
pub enum SimError {
    /// Trace source failure.
    #[error(transparent)]
    Trace(#[from] TraceError),

    /// The pipeline exceeded the cycle limit without draining.
    ///
    /// This indicates a bug or an unsatisfiable configuration (for example a
    /// class routed to an empty functional-unit pool). The snapshot captures
    /// the queue sizes and a window of stuck reservation-station tags.
    #[error(
        "no forward progress after {cycle} cycles \
         (dispatch queue {dispatch_queue_len}, station {station_len}, \
         result bus {result_bus_len}, busy units {busy_units}, stuck tags {stuck:?})"
    )]
    ProgressStall {
        /// Cycle at which the guard fired.
        cycle: u64,
        /// Instructions waiting in the dispatch queue.
        dispatch_queue_len: usize,
        /// Live reservation-station entries.
        station_len: usize,
        /// Pending result-bus broadcasts.
        result_bus_len: usize,
        /// Busy functional units across all pools.
        busy_units: usize,
        /// Tags of the oldest unfinished station entries.
        stuck: Vec<Tag>,
    },
}
