//! Configuration system for the simulator.
//!
//! This module defines the configuration structures and enums used to
//! parameterize a run. It provides:
//! 1. **Defaults:** Baseline machine constants (result buses, unit pools,
//!    fetch width, progress guard).
//! 2. **Structures:** Hierarchical config for general options and the
//!    pipeline shape.
//! 3. **Enums:** The functional-unit release policy.
//!
//! Configuration is supplied as JSON (CLI `--config`) or built in code; every
//! field has a default so partial documents deserialize cleanly.

use serde::Deserialize;

/// Default configuration constants for the simulator.
mod defaults {
    /// Result buses (CDBs) drained per cycle.
    pub const RESULT_BUSES: usize = 8;

    /// Class-0 functional units.
    pub const UNITS_CLASS0: usize = 1;

    /// Class-1 functional units.
    pub const UNITS_CLASS1: usize = 2;

    /// Class-2 functional units.
    pub const UNITS_CLASS2: usize = 3;

    /// Instructions fetched from the trace per cycle.
    pub const FETCH_WIDTH: usize = 4;

    /// Cycle count past which the run is declared stuck.
    pub const CYCLE_LIMIT: u64 = 1_000_000;
}

/// When a functional unit is returned to its pool.
///
/// The default holds a unit from fire until its result is drained onto a
/// result bus, which makes the bus count a real throughput limit:
/// completions beyond the drain bandwidth keep their units tied up and
/// throttle later firings of that class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum FuRelease {
    /// Free the unit when the result is broadcast on a result bus.
    #[default]
    Broadcast,
    /// Free the unit as soon as execution completes.
    Complete,
}

/// Root configuration structure.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use oosim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.pipeline.result_buses, 8);
/// assert_eq!(config.pipeline.station_capacity(), 12);
/// ```
///
/// Deserializing from JSON (any field may be omitted):
///
/// ```
/// use oosim_core::config::{Config, FuRelease};
///
/// let json = r#"{
///     "general": { "trace_stages": true },
///     "pipeline": {
///         "result_buses": 2,
///         "units_class0": 1,
///         "units_class1": 1,
///         "units_class2": 1,
///         "fetch_width": 2,
///         "fu_release": "Broadcast"
///     }
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert!(config.general.trace_stages);
/// assert_eq!(config.pipeline.station_capacity(), 6);
/// assert_eq!(config.pipeline.fu_release, FuRelease::Broadcast);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Pipeline shape and resource counts.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Builds a configuration with explicit pipeline resources: `r` result
    /// buses, `k0`/`k1`/`k2` units per class, and fetch width `f`.
    pub fn with_pipeline(r: usize, k0: usize, k1: usize, k2: usize, f: usize) -> Self {
        Self {
            general: GeneralConfig::default(),
            pipeline: PipelineConfig {
                result_buses: r,
                units_class0: k0,
                units_class1: k1,
                units_class2: k2,
                fetch_width: f,
                ..PipelineConfig::default()
            },
        }
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Emit one stderr line per stage event (fetch, dispatch, fire, broadcast, retire).
    #[serde(default)]
    pub trace_stages: bool,
}

/// Pipeline shape and resource counts.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Result buses (CDBs) drained per cycle. Must be at least 1.
    #[serde(default = "PipelineConfig::default_result_buses")]
    pub result_buses: usize,

    /// Class-0 functional units. A zero pool starves class-0 instructions.
    #[serde(default = "PipelineConfig::default_units_class0")]
    pub units_class0: usize,

    /// Class-1 functional units.
    #[serde(default = "PipelineConfig::default_units_class1")]
    pub units_class1: usize,

    /// Class-2 functional units.
    #[serde(default = "PipelineConfig::default_units_class2")]
    pub units_class2: usize,

    /// Instructions fetched from the trace per cycle. Must be at least 1.
    #[serde(default = "PipelineConfig::default_fetch_width")]
    pub fetch_width: usize,

    /// Functional-unit release policy.
    #[serde(default)]
    pub fu_release: FuRelease,

    /// Progress guard: abort the run past this many cycles.
    #[serde(default = "PipelineConfig::default_cycle_limit")]
    pub cycle_limit: u64,
}

impl PipelineConfig {
    /// Reservation-station capacity, derived as twice the total unit count.
    pub fn station_capacity(&self) -> usize {
        2 * (self.units_class0 + self.units_class1 + self.units_class2)
    }

    /// Returns the default result-bus count.
    fn default_result_buses() -> usize {
        defaults::RESULT_BUSES
    }

    /// Returns the default class-0 pool size.
    fn default_units_class0() -> usize {
        defaults::UNITS_CLASS0
    }

    /// Returns the default class-1 pool size.
    fn default_units_class1() -> usize {
        defaults::UNITS_CLASS1
    }

    /// Returns the default class-2 pool size.
    fn default_units_class2() -> usize {
        defaults::UNITS_CLASS2
    }

    /// Returns the default fetch width.
    fn default_fetch_width() -> usize {
        defaults::FETCH_WIDTH
    }

    /// Returns the default progress-guard cycle limit.
    fn default_cycle_limit() -> u64 {
        defaults::CYCLE_LIMIT
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            result_buses: defaults::RESULT_BUSES,
            units_class0: defaults::UNITS_CLASS0,
            units_class1: defaults::UNITS_CLASS1,
            units_class2: defaults::UNITS_CLASS2,
            fetch_width: defaults::FETCH_WIDTH,
            fu_release: FuRelease::default(),
            cycle_limit: defaults::CYCLE_LIMIT,
        }
    }
}
