use cobench_common::{CoBenchError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::clock::Clock;
use crate::config::{MAX_PREALLOCATED_REQUESTS, MAX_SLEEP_SLICE};
use crate::load::Load;
use crate::recording::Recording;
use crate::task::Task;

/// Shared flag used to abort a run from another thread (e.g. a Ctrl-C handler).
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Outcome of one benchmark: the measurement recording and how long the measured phase took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkRun {
    pub recording: Recording,
    pub elapsed_ns: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Warmup,
    Measurement,
}

/// Schedule-run-measure loop.
///
/// Arrivals follow the load's schedule independently of how long each request takes
/// (open model). A request that is already due when the previous one finishes starts
/// immediately; otherwise the loop waits for its arrival time.
pub struct Benchmark {
    clock: Arc<dyn Clock>,
    request_count: u64,
    warmup_count: u64,
    cancel: CancelToken,
}

impl Benchmark {
    pub fn new(clock: Arc<dyn Clock>, request_count: u64, warmup_count: u64) -> Self {
        Self { clock, request_count, warmup_count, cancel: CancelToken::new() }
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Run the warm-up phase, discard it, then run and return the measurement phase.
    ///
    /// Each phase starts its own arrival clock at "now", so a backlog built up during
    /// warm-up never shows up as queueing in the measured phase.
    pub fn run(&self, load: &mut Load, task: &mut dyn Task) -> Result<BenchmarkRun> {
        debug!(warmup = self.warmup_count, requests = self.request_count, "benchmark started");

        let warmup = self.run_phase(Phase::Warmup, self.warmup_count, load, task)?;
        drop(warmup);

        let started_ns = self.clock.now_ns();
        let recording = self.run_phase(Phase::Measurement, self.request_count, load, task)?;
        let elapsed_ns = self.clock.now_ns() - started_ns;

        info!(recorded = recording.len(), elapsed_ms = elapsed_ns / 1_000_000, "benchmark finished");
        Ok(BenchmarkRun { recording, elapsed_ns })
    }

    /// Run `workers` independent loops on scoped threads.
    ///
    /// Each worker owns its own load, task and recording; nothing is shared between
    /// loops except the clock and the cancel token. Results come back in worker order.
    pub fn run_workers<L, T>(
        &self,
        workers: usize,
        make_load: L,
        make_task: T,
    ) -> Result<Vec<BenchmarkRun>>
    where
        L: Fn(usize) -> Load + Sync,
        T: Fn(usize) -> Box<dyn Task> + Sync,
    {
        let make_load = &make_load;
        let make_task = &make_task;
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|worker| {
                    scope.spawn(move || {
                        let mut load = make_load(worker);
                        let mut task = make_task(worker);
                        self.run(&mut load, task.as_mut())
                    })
                })
                .collect();

            // join every handle before looking at any result
            let joined: Vec<Result<BenchmarkRun>> = handles
                .into_iter()
                .enumerate()
                .map(|(worker, handle)| {
                    handle.join().map_err(|_| CoBenchError::WorkerPanicked(worker))?
                })
                .collect();
            joined.into_iter().collect()
        })
    }

    fn run_phase(
        &self,
        phase: Phase,
        count: u64,
        load: &mut Load,
        task: &mut dyn Task,
    ) -> Result<Recording> {
        let mut recording = Recording::with_capacity(count.min(MAX_PREALLOCATED_REQUESTS) as usize);
        let mut arrival_ns = self.clock.now_ns();
        let mut finished_ns = i64::MIN;
        let mut processed: u64 = 0;

        debug!(?phase, count, "phase started");

        while processed < count {
            if self.cancel.is_cancelled() {
                return Err(CoBenchError::Cancelled { recorded: recording.len() });
            }

            // schedule
            let gap = i64::try_from(load.next_relative_time_ns()).unwrap_or(i64::MAX);
            arrival_ns = arrival_ns.saturating_add(gap);
            if finished_ns < arrival_ns {
                self.wait_until(arrival_ns, recording.len())?;
            }

            // run & measure
            let started_ns = self.clock.now_ns();
            std::hint::black_box(task.execute());
            finished_ns = self.clock.now_ns();

            processed += 1;
            recording.record(arrival_ns, started_ns, finished_ns);
        }

        debug!(?phase, recorded = recording.len(), "phase finished");
        Ok(recording)
    }

    /// Block until the clock reaches `target_ns`. Early wake-ups go back to sleep.
    fn wait_until(&self, target_ns: i64, recorded: usize) -> Result<()> {
        loop {
            let now_ns = self.clock.now_ns();
            if now_ns >= target_ns {
                return Ok(());
            }
            if self.cancel.is_cancelled() {
                return Err(CoBenchError::Cancelled { recorded });
            }
            let remaining = Duration::from_nanos((target_ns - now_ns) as u64);
            self.clock.sleep(remaining.min(MAX_SLEEP_SLICE));
        }
    }
}
