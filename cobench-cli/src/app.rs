use cobench_common::{BenchConfig, CoBenchError, Result};
use cobench_core::export::export_raw_csv;
use cobench_core::sweep::{run_sweep, SweepRow};
use cobench_core::{load, task, Analysis, Benchmark, CancelToken, Clock, Load, Recording, TimeZero};
use std::sync::Arc;
use tracing::info;

/// What a finished invocation produced.
pub enum Outcome {
    Single(SingleRun),
    Sweep(Vec<SweepRow>),
}

pub struct SingleRun {
    pub load: String,
    pub task: String,
    pub elapsed_ns: i64,
    pub analysis: Analysis,
    /// Set when the raw table could not be written; the analysis is still valid.
    pub export_error: Option<CoBenchError>,
}

/// Run the benchmark (or sweep) described by `config`.
pub fn execute(
    config: &BenchConfig,
    clock: Arc<dyn Clock>,
    time_zero: TimeZero,
    cancel: &CancelToken,
) -> Result<Outcome> {
    config.validate()?;

    if let Some(spec) = &config.sweep {
        let mut task = task::from_spec(&config.task, config.seed);
        info!(task = %task.description(), "starting load sweep");
        let rows = run_sweep(
            clock,
            spec,
            config.request_count,
            config.warmup_count,
            config.percentile_rank,
            task.as_mut(),
            cancel,
        )?;
        return Ok(Outcome::Sweep(rows));
    }

    let load = load::describe(&config.load);
    let task_description = task::from_spec(&config.task, config.seed).description();
    info!(%load, task = %task_description, requests = config.request_count, warmup = config.warmup_count, "starting benchmark");

    let benchmark = Benchmark::new(clock, config.request_count, config.warmup_count)
        .with_cancel_token(cancel.clone());
    let seed_for = |worker: usize| config.seed.map(|s| s.wrapping_add(worker as u64));
    let runs = benchmark.run_workers(
        config.workers,
        |worker| Load::from_spec(&config.load, seed_for(worker)),
        |worker| task::from_spec(&config.task, seed_for(worker)),
    )?;

    let elapsed_ns = runs.iter().map(|r| r.elapsed_ns).max().unwrap_or(0);
    let recordings: Vec<Recording> = runs.into_iter().map(|r| r.recording).collect();
    let analysis = Analysis::of_recordings(&recordings, config.percentile_rank)?;

    let export_error = match &config.raw_csv {
        Some(path) => {
            let merged = concat_recordings(&recordings)?;
            export_raw_csv(path, &merged, &analysis.timings, time_zero).err()
        }
        None => None,
    };

    Ok(Outcome::Single(SingleRun {
        load,
        task: task_description,
        elapsed_ns,
        analysis,
        export_error,
    }))
}

/// Read-only concatenation of finished recordings, in worker order, for export.
fn concat_recordings(recordings: &[Recording]) -> Result<Recording> {
    let column = |pick: fn(&Recording) -> &[i64]| -> Vec<i64> {
        recordings.iter().flat_map(|r| pick(r).iter().copied()).collect()
    };
    Recording::from_columns(
        column(Recording::arrivals),
        column(Recording::starts),
        column(Recording::finishes),
    )
}
