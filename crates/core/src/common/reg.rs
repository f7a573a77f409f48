//! Instruction tags and architectural register indices.
//!
//! Both types replace the raw integer sentinels of the trace format: a tag of
//! zero and a register of `-1` are expressed as `Option<Tag>` and
//! `Option<ArchReg>` at the type level, so "no pending producer" and "no
//! register" cannot be confused with real values.

use std::fmt;

/// Number of architectural registers addressable by trace records.
pub const REG_COUNT: usize = 128;

/// Unique tag identifying an in-flight instruction.
///
/// Tags are assigned monotonically from 1 at fetch and identify an
/// instruction for its whole lifetime, including in the retired log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag(pub u64);

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Architectural register index in `0..REG_COUNT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ArchReg(u8);

impl ArchReg {
    /// Converts a raw trace-record register field.
    ///
    /// Negative values encode "no register"; out-of-range indices are treated
    /// the same way rather than rejected.
    pub fn from_raw(raw: i32) -> Option<ArchReg> {
        if (0..REG_COUNT as i32).contains(&raw) {
            Some(ArchReg(raw as u8))
        } else {
            None
        }
    }

    /// Returns the register index for table lookups.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ArchReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}
