//! Configuration defaults and JSON deserialization.

use oosim_core::config::{Config, FuRelease, PipelineConfig};

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(!config.general.trace_stages);
    assert_eq!(config.pipeline.result_buses, 8);
    assert_eq!(config.pipeline.units_class0, 1);
    assert_eq!(config.pipeline.units_class1, 2);
    assert_eq!(config.pipeline.units_class2, 3);
    assert_eq!(config.pipeline.fetch_width, 4);
    assert_eq!(config.pipeline.fu_release, FuRelease::Broadcast);
    assert_eq!(config.pipeline.cycle_limit, 1_000_000);
}

#[test]
fn test_station_capacity_is_twice_unit_total() {
    assert_eq!(PipelineConfig::default().station_capacity(), 12);

    let config = Config::with_pipeline(8, 1, 1, 1, 2);
    assert_eq!(config.pipeline.station_capacity(), 6);
}

#[test]
fn test_with_pipeline_sets_resources() {
    let config = Config::with_pipeline(2, 3, 4, 5, 6);
    assert_eq!(config.pipeline.result_buses, 2);
    assert_eq!(config.pipeline.units_class0, 3);
    assert_eq!(config.pipeline.units_class1, 4);
    assert_eq!(config.pipeline.units_class2, 5);
    assert_eq!(config.pipeline.fetch_width, 6);
    // Untouched fields keep their defaults
    assert_eq!(config.pipeline.cycle_limit, 1_000_000);
    assert_eq!(config.pipeline.fu_release, FuRelease::Broadcast);
}

#[test]
fn test_deserialize_full_document() {
    let json = r#"{
        "general": { "trace_stages": true },
        "pipeline": {
            "result_buses": 1,
            "units_class0": 2,
            "units_class1": 0,
            "units_class2": 0,
            "fetch_width": 4,
            "fu_release": "Complete",
            "cycle_limit": 500
        }
    }"#;

    let config: Config = serde_json::from_str(json).unwrap();
    assert!(config.general.trace_stages);
    assert_eq!(config.pipeline.result_buses, 1);
    assert_eq!(config.pipeline.units_class0, 2);
    assert_eq!(config.pipeline.station_capacity(), 4);
    assert_eq!(config.pipeline.fu_release, FuRelease::Complete);
    assert_eq!(config.pipeline.cycle_limit, 500);
}

#[test]
fn test_deserialize_empty_document_uses_defaults() {
    let config: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(config.pipeline.result_buses, 8);
    assert_eq!(config.pipeline.station_capacity(), 12);
}

#[test]
fn test_deserialize_partial_pipeline() {
    let config: Config = serde_json::from_str(r#"{ "pipeline": { "fetch_width": 8 } }"#).unwrap();
    assert_eq!(config.pipeline.fetch_width, 8);
    assert_eq!(config.pipeline.result_buses, 8);
}
