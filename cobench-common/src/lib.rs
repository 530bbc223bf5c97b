use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod config;

pub use config::{BenchConfig, LoadSpec, SweepSpec, TaskSpec};

/// Percentile reported by every indicator unless configured otherwise.
pub const DEFAULT_PERCENTILE_RANK: u32 = 99;

/// Header of the raw semicolon-separated export, one column per recorded or derived timing.
pub const RAW_CSV_HEADER: [&str; 9] = [
    "arrival",
    "start",
    "finish",
    "idle",
    "wait",
    "dequeue",
    "processing",
    "grossProcessing",
    "service",
];

/// Error types for cobench operations
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoBenchError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Cannot summarize an empty sample: {0}")]
    EmptySample(String),

    #[error("Series length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Run cancelled after {recorded} recorded requests")]
    Cancelled { recorded: usize },

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Cannot load configuration file: {0}")]
    ConfigFile(String),

    #[error("Worker {0} panicked")]
    WorkerPanicked(usize),
}

/// Result type for cobench operations
pub type Result<T> = std::result::Result<T, CoBenchError>;
