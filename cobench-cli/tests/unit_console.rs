use cobench_cli::console::{ns_to_ms, render_report, render_sweep};
use cobench_core::report::names;
use cobench_core::sweep::SweepRow;
use cobench_core::{Analysis, Recording};

// --- Test helpers ---

fn recording(rows: &[(i64, i64, i64)]) -> Recording {
    let mut recording = Recording::new();
    for &(arrival, start, finish) in rows {
        recording.record(arrival, start, finish);
    }
    recording
}

fn line_of(rendered: &str, name: &str) -> usize {
    rendered
        .lines()
        .position(|line| line.trim_start().starts_with(&format!("{name}:")))
        .unwrap_or_else(|| panic!("no line for {name} in\n{rendered}"))
}

// --- Report rendering ---

#[test]
fn test_report_groups_in_order() {
    let rec = recording(&[(0, 0, 100), (50, 100, 200), (100, 200, 300)]);
    let analysis = Analysis::of_recording(&rec, 99).unwrap();
    let rendered = render_report(&analysis.report);

    assert!(rendered.starts_with("Indicators:\n"));
    let order = [
        names::SERVICE,
        names::CALCULATED_SERVICE,
        names::PROCESSING,
        names::ARRIVAL_DIFF,
        names::GROSS_PROCESSING,
        names::IDLE,
        names::WAIT,
        names::DEQUEUE,
    ];
    let positions: Vec<usize> = order.iter().map(|name| line_of(&rendered, name)).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{rendered}");

    let separators = rendered.lines().filter(|line| line.starts_with("---")).count();
    assert_eq!(separators, 2);
    assert!(!rendered.contains("anomalies"));
}

#[test]
fn test_report_line_in_milliseconds() {
    let rec = recording(&[(0, 0, 2_000_000), (2_000_000, 2_000_000, 4_000_000)]);
    let analysis = Analysis::of_recording(&rec, 99).unwrap();
    let rendered = render_report(&analysis.report);

    let processing = rendered.lines().nth(line_of(&rendered, names::PROCESSING)).unwrap();
    assert!(processing.contains("min: 2.000000 ms"), "{processing}");
    assert!(processing.contains("99%: 2.000000 ms"), "{processing}");
}

#[test]
fn test_single_request_report_omits_pairwise_lines() {
    let rec = recording(&[(0, 0, 10)]);
    let analysis = Analysis::of_recording(&rec, 99).unwrap();
    let rendered = render_report(&analysis.report);

    assert!(rendered.contains(names::SERVICE));
    assert!(!rendered.contains(names::ARRIVAL_DIFF));
    assert!(!rendered.contains(names::CALCULATED_SERVICE));
}

#[test]
fn test_anomalies_noted() {
    // Starts before it arrives, which also makes its dequeue time negative.
    let rec = recording(&[(100, 50, 150), (200, 200, 250)]);
    let analysis = Analysis::of_recording(&rec, 99).unwrap();
    let rendered = render_report(&analysis.report);

    assert!(rendered.contains("[anomalous]"));
    assert!(rendered.contains("2 timing anomalies detected"));
}

// --- Sweep rendering ---

#[test]
fn test_sweep_table() {
    let rows = [
        SweepRow { interval_ns: 1_000_000, service_ns: 3_000_000, processing_ns: 500_000, estimated_service_ns: 2_500_000 },
        SweepRow { interval_ns: 2_000_000, service_ns: 600_000, processing_ns: 500_000, estimated_service_ns: 600_000 },
    ];
    let rendered = render_sweep(&rows, 95);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "95% percentiles in ms");
    assert_eq!(lines[1].split(';').map(str::trim).collect::<Vec<_>>(), ["load", "service", "processing", "est. service"]);
    assert_eq!(
        lines[2].split(';').map(str::trim).collect::<Vec<_>>(),
        ["1.000000", "3.000000", "0.500000", "2.500000"]
    );
}

#[test]
fn test_ns_to_ms() {
    assert_eq!(ns_to_ms(1_500_000), 1.5);
    assert_eq!(ns_to_ms(0), 0.0);
}
