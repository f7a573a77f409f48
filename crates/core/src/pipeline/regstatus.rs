//! Register status table: per-register ready bit and latest-producer tag.
//!
//! The producer tag maps each architectural register to the tag of its latest
//! in-flight writer. The ready bit accelerates the common "no pending writer"
//! path at dispatch time, but it is not authoritative for scheduling: under
//! write-after-write sequencing an earlier writer's broadcast sets the ready
//! bit while a consumer still depends on a later writer. Consumers therefore
//! capture the producer tag at dispatch and wait for that specific broadcast.

use crate::common::{ArchReg, REG_COUNT, Tag};

/// Per-register ready bits and latest-producer tags.
pub struct RegStatusTable {
    ready: [bool; REG_COUNT],
    producer: [Option<Tag>; REG_COUNT],
}

impl Default for RegStatusTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RegStatusTable {
    /// Creates a table with every register ready and no pending writers.
    pub fn new() -> Self {
        Self {
            ready: [true; REG_COUNT],
            producer: [None; REG_COUNT],
        }
    }

    /// Records `tag` as the latest pending writer of `reg` and clears its
    /// ready bit.
    pub fn set_producer(&mut self, reg: ArchReg, tag: Tag) {
        self.ready[reg.index()] = false;
        self.producer[reg.index()] = Some(tag);
    }

    /// Returns the latest pending writer of `reg`, if any.
    pub fn producer(&self, reg: ArchReg) -> Option<Tag> {
        self.producer[reg.index()]
    }

    /// Returns the ready bit for `reg`.
    pub fn is_ready(&self, reg: ArchReg) -> bool {
        self.ready[reg.index()]
    }

    /// Applies a broadcast for `reg` by `tag`: sets the ready bit, and clears
    /// the pending writer ONLY if it is still `tag`. A later dispatched
    /// writer may already have claimed the register; its claim must survive.
    pub fn mark_ready(&mut self, reg: ArchReg, tag: Tag) {
        self.ready[reg.index()] = true;
        if self.producer[reg.index()] == Some(tag) {
            self.producer[reg.index()] = None;
        }
    }
}
