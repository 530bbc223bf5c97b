//! Open-model latency benchmarking with coordinated-omission correction.
//!
//! [`runner::Benchmark`] drives a [`task::Task`] at the arrival times produced by a
//! [`load::Load`] and records raw timestamps. [`timings::Timings`] derives the
//! per-request intervals, [`correction`] reconstructs the service times a
//! non-stalling client would have observed, and [`report::Report`] summarizes
//! every series as an [`indicator::Indicator`].

pub mod clock;
pub mod config;
pub mod correction;
pub mod export;
pub mod indicator;
pub mod load;
pub mod recording;
pub mod report;
pub mod runner;
pub mod sweep;
pub mod task;
pub mod timings;

pub use clock::{Clock, MonotonicClock, TimeZero};
pub use correction::{estimate_service_times, estimate_service_times_with, DequeueModel};
pub use indicator::Indicator;
pub use load::Load;
pub use recording::Recording;
pub use report::{Analysis, Report};
pub use runner::{Benchmark, BenchmarkRun, CancelToken};
pub use task::Task;
pub use timings::{Anomaly, AnomalyKind, Timings};
