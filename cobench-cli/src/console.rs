use cobench_core::config::NANOS_PER_MILLI;
use cobench_core::report::names;
use cobench_core::sweep::SweepRow;
use cobench_core::Report;
use std::fmt::Write;

const SEPARATOR: &str = "---------------------------------------------------------------------------------------------------------------------";

/// Indicator groups in print order; groups are separated by a rule.
const GROUPS: [&[&str]; 3] = [
    &[names::SERVICE, names::CALCULATED_SERVICE, names::PROCESSING],
    &[names::ARRIVAL_DIFF, names::GROSS_PROCESSING],
    &[names::IDLE, names::WAIT, names::DEQUEUE],
];

/// Render the indicator set, skipping indicators the report does not have.
pub fn render_report(report: &Report) -> String {
    let mut out = String::from("Indicators:\n");
    for (i, group) in GROUPS.iter().enumerate() {
        if i > 0 {
            out.push_str(SEPARATOR);
            out.push('\n');
        }
        for name in group.iter() {
            if let Some(indicator) = report.indicator(name) {
                let _ = writeln!(out, "  {indicator}");
            }
        }
    }
    if report.anomaly_count() > 0 {
        let _ = writeln!(
            out,
            "\n{} timing anomalies detected; [anomalous] indicators include them",
            report.anomaly_count()
        );
    }
    out
}

/// Semicolon table of the sweep percentiles, in milliseconds.
pub fn render_sweep(rows: &[SweepRow], rank: u32) -> String {
    let mut out = format!("{rank}% percentiles in ms\n");
    let _ = writeln!(out, "{:>14};{:>14};{:>14};{:>14}", "load", "service", "processing", "est. service");
    for row in rows {
        let _ = writeln!(
            out,
            "{:>14.6};{:>14.6};{:>14.6};{:>14.6}",
            row.interval_ns as f64 / NANOS_PER_MILLI,
            row.service_ns as f64 / NANOS_PER_MILLI,
            row.processing_ns as f64 / NANOS_PER_MILLI,
            row.estimated_service_ns as f64 / NANOS_PER_MILLI,
        );
    }
    out
}

pub fn ns_to_ms(ns: i64) -> f64 {
    ns as f64 / NANOS_PER_MILLI
}
