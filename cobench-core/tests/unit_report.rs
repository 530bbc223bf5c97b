use cobench_common::CoBenchError;
use cobench_core::report::names;
use cobench_core::{Analysis, Recording, Report, Timings};

fn backlogged() -> Recording {
    Recording::from_columns(
        vec![1100, 1200, 1300, 1400],
        vec![1100, 1350, 1360, 1400],
        vec![1350, 1360, 1370, 1410],
    )
    .unwrap()
}

#[test]
fn test_analysis_of_backlogged_trace() {
    let analysis = Analysis::of_recording(&backlogged(), 50).unwrap();
    assert_eq!(analysis.estimated_service, vec![160, 70, 10]);

    let report = &analysis.report;
    assert_eq!(report.indicators().len(), 8);
    assert_eq!(report.anomaly_count(), 0);
    assert!(!report.is_flagged());

    // service [250, 160, 70, 10] -> sorted [10, 70, 160, 250], p50 index 1
    let service = report.indicator(names::SERVICE).unwrap();
    assert_eq!(service.percentile(), 70);
    assert_eq!(service.max(), 250);
    assert_eq!(service.average(), 122.5);

    let corrected = report.indicator(names::CALCULATED_SERVICE).unwrap();
    assert_eq!(corrected.min(), 10);
    assert_eq!(corrected.max(), 160);

    let diff = report.indicator(names::ARRIVAL_DIFF).unwrap();
    assert_eq!((diff.min(), diff.max()), (100, 100));

    for name in [names::IDLE, names::WAIT, names::DEQUEUE, names::PROCESSING, names::GROSS_PROCESSING] {
        assert!(report.indicator(name).is_some(), "missing {name}");
    }
    assert!(report.indicator("unknown").is_none());
}

#[test]
fn test_empty_recording_rejected() {
    let err = Analysis::of_recording(&Recording::new(), 99).unwrap_err();
    assert_eq!(err, CoBenchError::EmptySample(names::SERVICE.to_string()));
}

#[test]
fn test_single_request_skips_pairwise_indicators() {
    let recording = Recording::from_columns(vec![0], vec![5], vec![20]).unwrap();
    let analysis = Analysis::of_recording(&recording, 99).unwrap();
    let report = &analysis.report;
    assert_eq!(report.indicators().len(), 6);
    assert!(report.indicator(names::ARRIVAL_DIFF).is_none());
    assert!(report.indicator(names::CALCULATED_SERVICE).is_none());
    assert_eq!(report.indicator(names::SERVICE).unwrap().percentile(), 20);
}

#[test]
fn test_anomalies_flag_affected_indicators() {
    // second request finishes before it starts
    let recording = Recording::from_columns(vec![0, 100], vec![0, 100], vec![10, 90]).unwrap();
    let timings = Timings::calculate(&recording);
    let report = Report::build(&timings, &[-10], 99).unwrap();

    assert_eq!(report.anomaly_count(), 1);
    assert!(report.is_flagged());
    assert!(report.indicator(names::PROCESSING).unwrap().is_flagged());
    assert!(report.indicator(names::SERVICE).unwrap().is_flagged());
    assert!(report.indicator(names::CALCULATED_SERVICE).unwrap().is_flagged());
    assert!(!report.indicator(names::IDLE).unwrap().is_flagged());
    assert!(!report.indicator(names::ARRIVAL_DIFF).unwrap().is_flagged());
}

#[test]
fn test_workers_analyzed_independently() {
    // Analysed together, the second trace's first arrival would look like it went
    // backwards; analysed per worker, nothing is anomalous.
    let a = Recording::from_columns(vec![1000, 1100], vec![1000, 1100], vec![1050, 1150]).unwrap();
    let b = Recording::from_columns(vec![0, 100], vec![0, 300], vec![300, 310]).unwrap();
    let analysis = Analysis::of_recordings(&[a, b], 99).unwrap();

    assert_eq!(analysis.timings.len(), 4);
    assert!(analysis.timings.anomalies().is_empty());
    assert_eq!(analysis.timings.arrival_diff(), &[100, 100]);
    // a: starts 1000, 1100 -> [50]; b: starts 0, 300 -> [210]
    assert_eq!(analysis.estimated_service, vec![50, 210]);
}
