use cobench_common::{CoBenchError, Result, SweepSpec};
use std::sync::Arc;
use tracing::info;

use crate::clock::Clock;
use crate::load::Load;
use crate::report::{names, Analysis};
use crate::runner::{Benchmark, CancelToken};
use crate::task::Task;

/// Percentiles observed in one sweep round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepRow {
    pub interval_ns: u64,
    pub service_ns: i64,
    pub processing_ns: i64,
    pub estimated_service_ns: i64,
}

/// Benchmark the same task under a steady load for each interval in the sweep.
///
/// Every round runs its own warm-up and measurement phases on a fresh recording.
/// A round whose report lacks one of the three indicators (a single measured request has
/// no calculated service time) fails with `EmptySample`.
pub fn run_sweep(
    clock: Arc<dyn Clock>,
    spec: &SweepSpec,
    request_count: u64,
    warmup_count: u64,
    rank: u32,
    task: &mut dyn Task,
    cancel: &CancelToken,
) -> Result<Vec<SweepRow>> {
    let benchmark = Benchmark::new(clock, request_count, warmup_count)
        .with_cancel_token(cancel.clone());

    let mut rows = Vec::new();
    for interval_ns in intervals(spec) {
        let mut load = Load::steady(interval_ns);
        let run = benchmark.run(&mut load, task)?;
        let analysis = Analysis::of_recording(&run.recording, rank)?;
        let percentile = |name: &str| {
            analysis
                .report
                .indicator(name)
                .map(|i| i.percentile())
                .ok_or_else(|| CoBenchError::EmptySample(name.to_string()))
        };
        let row = SweepRow {
            interval_ns,
            service_ns: percentile(names::SERVICE)?,
            processing_ns: percentile(names::PROCESSING)?,
            estimated_service_ns: percentile(names::CALCULATED_SERVICE)?,
        };
        info!(
            interval_ns,
            service_ns = row.service_ns,
            estimated_service_ns = row.estimated_service_ns,
            "sweep round finished"
        );
        rows.push(row);
    }
    Ok(rows)
}

/// Intervals from `min` to `max` inclusive. A zero step yields only `min`.
pub fn intervals(spec: &SweepSpec) -> Vec<u64> {
    if spec.step_ns == 0 {
        return vec![spec.min_interval_ns];
    }
    let mut out = Vec::new();
    let mut interval = spec.min_interval_ns;
    while interval <= spec.max_interval_ns {
        out.push(interval);
        match interval.checked_add(spec.step_ns) {
            Some(next) => interval = next,
            None => break,
        }
    }
    out
}
