//! Trace sources: the pull interface the pipeline fetches from.
//!
//! A trace record carries a decoded instruction: an informational address, an
//! op code selecting the functional-unit class, a destination register, and
//! two source registers. Negative (or out-of-range) register fields encode
//! "no register". This module provides:
//! 1. **`TraceSource`:** The pull contract consumed by the fetch stage.
//! 2. **`FileTrace`:** Reader for the whitespace-separated text format
//!    (hex address, then four decimal fields).
//! 3. **`VecTrace`:** In-memory source for tests and examples.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::common::error::TraceError;

/// One decoded instruction as read from a trace.
///
/// Register fields are raw trace integers; the sentinel coercion to
/// `Option<ArchReg>` happens when the record is decoded into an `Inst`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// Instruction address. Informational only; never used semantically.
    pub address: u32,
    /// Op code: 0, 1, or 2 select a unit class; -1 means "use class 1".
    pub op_code: i32,
    /// Destination register, negative for none.
    pub dest: i32,
    /// Source registers, negative for none.
    pub src: [i32; 2],
}

/// Pull interface for instruction traces.
///
/// `Ok(None)` means the trace is exhausted; the fetch stage will not call
/// again after that.
pub trait TraceSource {
    /// Produces the next record, or `None` at end of trace.
    fn next_record(&mut self) -> Result<Option<TraceRecord>, TraceError>;
}

/// Text-format trace reader.
///
/// Each non-blank line is one record: `address op dest src0 src1`, with the
/// address in hexadecimal (optional `0x` prefix) and the remaining fields in
/// decimal. Blank lines are skipped; anything else malformed is an error.
#[derive(Debug)]
pub struct FileTrace {
    lines: Lines<BufReader<File>>,
    line_no: usize,
}

impl FileTrace {
    /// Opens a trace file. This is the trace-open failure point: a missing or
    /// unreadable file stops the run before the pipeline is built.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TraceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
            line_no: 0,
        })
    }
}

impl TraceSource for FileTrace {
    fn next_record(&mut self) -> Result<Option<TraceRecord>, TraceError> {
        loop {
            let line = match self.lines.next() {
                None => return Ok(None),
                Some(line) => line?,
            };
            self.line_no += 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            return match parse_record(trimmed) {
                Some(record) => Ok(Some(record)),
                None => Err(TraceError::Malformed {
                    line_no: self.line_no,
                    line,
                }),
            };
        }
    }
}

/// Parses a single `address op dest src0 src1` line.
fn parse_record(line: &str) -> Option<TraceRecord> {
    let mut fields = line.split_whitespace();
    let address = fields.next()?;
    let address = u32::from_str_radix(address.trim_start_matches("0x"), 16).ok()?;
    let op_code = fields.next()?.parse().ok()?;
    let dest = fields.next()?.parse().ok()?;
    let src0 = fields.next()?.parse().ok()?;
    let src1 = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some(TraceRecord {
        address,
        op_code,
        dest,
        src: [src0, src1],
    })
}

/// In-memory trace source over a fixed record list.
pub struct VecTrace {
    records: std::vec::IntoIter<TraceRecord>,
}

impl VecTrace {
    /// Wraps a record list; records are produced in order.
    pub fn new(records: Vec<TraceRecord>) -> Self {
        Self {
            records: records.into_iter(),
        }
    }
}

impl TraceSource for VecTrace {
    fn next_record(&mut self) -> Result<Option<TraceRecord>, TraceError> {
        Ok(self.records.next())
    }
}
