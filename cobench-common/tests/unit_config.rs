use cobench_common::{
    BenchConfig, CoBenchError, LoadSpec, SweepSpec, TaskSpec, DEFAULT_PERCENTILE_RANK,
};
use std::io::Write;

fn steady_counter() -> BenchConfig {
    BenchConfig::new(LoadSpec::Steady { interval_ns: 1_000 }, TaskSpec::Counter, 10, 5)
}

#[test]
fn test_defaults_applied_when_omitted() {
    let json = r#"{
        "load": {"kind": "exponential", "mean_ns": 30000000},
        "task": {"kind": "fibonacci", "index": 1000000},
        "request_count": 1000
    }"#;
    let config = BenchConfig::from_json_str(json).unwrap();
    assert_eq!(config.load, LoadSpec::Exponential { mean_ns: 30_000_000 });
    assert_eq!(config.task, TaskSpec::Fibonacci { index: 1_000_000 });
    assert_eq!(config.warmup_count, 0);
    assert_eq!(config.percentile_rank, DEFAULT_PERCENTILE_RANK);
    assert_eq!(config.workers, 1);
    assert!(config.raw_csv.is_none());
    assert!(config.seed.is_none());
    assert!(config.sweep.is_none());
}

#[test]
fn test_roundtrip_json() {
    let mut original = steady_counter();
    original.seed = Some(7);
    original.sweep = Some(SweepSpec { min_interval_ns: 100, max_interval_ns: 200, step_ns: 50 });
    let json = serde_json::to_string(&original).unwrap();
    let decoded = BenchConfig::from_json_str(&json).unwrap();
    assert_eq!(original, decoded);
}

#[test]
fn test_negative_count_rejected_by_parser() {
    let json = r#"{
        "load": {"kind": "steady", "interval_ns": 10},
        "task": {"kind": "counter"},
        "request_count": -1
    }"#;
    assert!(matches!(BenchConfig::from_json_str(json), Err(CoBenchError::ConfigFile(_))));
}

#[test]
fn test_missing_task_rejected_by_parser() {
    let json = r#"{"load": {"kind": "steady", "interval_ns": 10}, "request_count": 1}"#;
    assert!(matches!(BenchConfig::from_json_str(json), Err(CoBenchError::ConfigFile(_))));
}

#[test]
fn test_validate_percentile_rank_bounds() {
    let mut config = steady_counter();
    config.percentile_rank = 0;
    assert!(matches!(config.validate(), Err(CoBenchError::InvalidConfig(_))));
    config.percentile_rank = 101;
    assert!(matches!(config.validate(), Err(CoBenchError::InvalidConfig(_))));
    config.percentile_rank = 100;
    assert!(config.validate().is_ok());
    config.percentile_rank = 1;
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_degenerate_parameters() {
    let mut config = steady_counter();
    config.workers = 0;
    assert!(config.validate().is_err());

    let mut config = steady_counter();
    config.load = LoadSpec::Exponential { mean_ns: 0 };
    assert!(config.validate().is_err());

    let mut config = steady_counter();
    config.task = TaskSpec::RandomizedFibonacci { min_index: 0 };
    assert!(config.validate().is_err());

    let mut config = steady_counter();
    config.sweep = Some(SweepSpec { min_interval_ns: 10, max_interval_ns: 20, step_ns: 0 });
    assert!(config.validate().is_err());

    let mut config = steady_counter();
    config.sweep = Some(SweepSpec { min_interval_ns: 30, max_interval_ns: 20, step_ns: 5 });
    assert!(config.validate().is_err());
}

#[test]
fn test_zero_warmup_is_valid() {
    let config = BenchConfig::new(LoadSpec::Steady { interval_ns: 0 }, TaskSpec::Counter, 1, 0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_zero_requests_rejected() {
    let config = BenchConfig::new(LoadSpec::Steady { interval_ns: 10 }, TaskSpec::Counter, 0, 20);
    assert!(matches!(config.validate(), Err(CoBenchError::InvalidConfig(_))));
}

#[test]
fn test_sweep_needs_two_requests_per_round() {
    let mut config = steady_counter();
    config.request_count = 1;
    config.sweep = Some(SweepSpec { min_interval_ns: 10, max_interval_ns: 20, step_ns: 10 });
    assert!(matches!(config.validate(), Err(CoBenchError::InvalidConfig(_))));

    config.request_count = 2;
    assert!(config.validate().is_ok());
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"load": {{"kind": "steady", "interval_ns": 1900000}}, "task": {{"kind": "spin", "duration_ns": 500}}, "request_count": 3, "percentile_rank": 90}}"#
    )
    .unwrap();
    let config = BenchConfig::from_file(file.path()).unwrap();
    assert_eq!(config.load, LoadSpec::Steady { interval_ns: 1_900_000 });
    assert_eq!(config.task, TaskSpec::Spin { duration_ns: 500 });
    assert_eq!(config.percentile_rank, 90);

    let missing = file.path().with_extension("missing");
    assert!(matches!(BenchConfig::from_file(&missing), Err(CoBenchError::ConfigFile(_))));
}
