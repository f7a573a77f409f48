//! Common types used throughout the simulator.
//!
//! This module provides the building blocks shared across all pipeline
//! components. It includes:
//! 1. **Identity Types:** Instruction tags and architectural register indices.
//! 2. **Error Handling:** Trace and simulation error definitions.

/// Error types for trace input and simulation failures.
pub mod error;

/// Instruction tags and architectural register indices.
pub mod reg;

pub use error::{SimError, TraceError};
pub use reg::{ArchReg, REG_COUNT, Tag};
