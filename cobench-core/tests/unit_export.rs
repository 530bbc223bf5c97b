use cobench_common::CoBenchError;
use cobench_core::export::{export_raw_csv, write_raw_csv};
use cobench_core::{Recording, TimeZero, Timings};

fn trace() -> Recording {
    Recording::from_columns(
        vec![1_000_100, 1_000_200],
        vec![1_000_100, 1_000_350],
        vec![1_000_350, 1_000_360],
    )
    .unwrap()
}

#[test]
fn test_rows_relative_to_time_zero() {
    let recording = trace();
    let timings = Timings::calculate(&recording);
    let mut out = Vec::new();
    write_raw_csv(&mut out, &recording, &timings, TimeZero::at(1_000_000)).unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "arrival;start;finish;idle;wait;dequeue;processing;grossProcessing;service",
            "100;100;350;0;0;0;250;250;250",
            "200;350;360;150;150;0;10;10;160",
        ]
    );
}

#[test]
fn test_empty_recording_writes_header_only() {
    let recording = Recording::new();
    let timings = Timings::calculate(&recording);
    let mut out = Vec::new();
    write_raw_csv(&mut out, &recording, &timings, TimeZero::default()).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "arrival;start;finish;idle;wait;dequeue;processing;grossProcessing;service\n"
    );
}

#[test]
fn test_mismatched_timings_rejected() {
    let recording = trace();
    let timings = Timings::calculate(&Recording::new());
    let err = write_raw_csv(Vec::new(), &recording, &timings, TimeZero::default()).unwrap_err();
    assert_eq!(err, CoBenchError::LengthMismatch { expected: 2, actual: 0 });
}

#[test]
fn test_export_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("raw_stat.csv");
    let recording = trace();
    let timings = Timings::calculate(&recording);
    export_raw_csv(&path, &recording, &timings, TimeZero::at(1_000_000)).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.starts_with("arrival;start;finish;"));
}

#[test]
fn test_export_failure_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("raw_stat.csv");
    let recording = trace();
    let timings = Timings::calculate(&recording);
    let err = export_raw_csv(&path, &recording, &timings, TimeZero::default()).unwrap_err();
    assert!(matches!(err, CoBenchError::Export(_)));
}
