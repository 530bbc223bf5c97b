use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{CoBenchError, Result, DEFAULT_PERCENTILE_RANK};

/// Inter-arrival distribution driving the open-model schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoadSpec {
    /// Constant gap between consecutive arrivals.
    Steady { interval_ns: u64 },
    /// Poisson arrivals with the given mean gap.
    Exponential { mean_ns: u64 },
}

/// Unit of work executed once per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskSpec {
    Counter,
    Fibonacci { index: u64 },
    /// Index drawn uniformly from `[min_index, 2 * min_index)` on every call.
    RandomizedFibonacci { min_index: u64 },
    /// Busy-wait for a fixed duration.
    Spin { duration_ns: u64 },
}

/// Steady-load sweep: one benchmark round per interval in `min..=max`, stepping by `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepSpec {
    pub min_interval_ns: u64,
    pub max_interval_ns: u64,
    pub step_ns: u64,
}

/// Everything needed to run one benchmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchConfig {
    pub load: LoadSpec,
    pub task: TaskSpec,
    pub request_count: u64,
    #[serde(default)]
    pub warmup_count: u64,
    #[serde(default = "default_percentile_rank")]
    pub percentile_rank: u32,
    /// Write the raw per-request table here when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_csv: Option<PathBuf>,
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sweep: Option<SweepSpec>,
}

fn default_percentile_rank() -> u32 {
    DEFAULT_PERCENTILE_RANK
}

fn default_workers() -> usize {
    1
}

impl BenchConfig {
    /// A single-worker configuration with default percentile and no export.
    pub fn new(load: LoadSpec, task: TaskSpec, request_count: u64, warmup_count: u64) -> Self {
        Self {
            load,
            task,
            request_count,
            warmup_count,
            percentile_rank: DEFAULT_PERCENTILE_RANK,
            raw_csv: None,
            workers: 1,
            seed: None,
            sweep: None,
        }
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CoBenchError::ConfigFile(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CoBenchError::ConfigFile(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// Reject configurations that cannot produce a meaningful run.
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.percentile_rank) {
            return Err(CoBenchError::InvalidConfig(format!(
                "percentile rank must be within 1..=100, got {}",
                self.percentile_rank
            )));
        }
        if self.request_count == 0 {
            return Err(CoBenchError::InvalidConfig(
                "at least one measured request is required".to_string(),
            ));
        }
        if self.workers == 0 {
            return Err(CoBenchError::InvalidConfig("at least one worker is required".to_string()));
        }
        if let LoadSpec::Exponential { mean_ns: 0 } = self.load {
            return Err(CoBenchError::InvalidConfig(
                "exponential load needs a positive mean".to_string(),
            ));
        }
        if let TaskSpec::RandomizedFibonacci { min_index: 0 } = self.task {
            return Err(CoBenchError::InvalidConfig(
                "randomized fibonacci needs a positive minimal index".to_string(),
            ));
        }
        if let Some(sweep) = &self.sweep {
            if sweep.step_ns == 0 {
                return Err(CoBenchError::InvalidConfig("sweep step must be positive".to_string()));
            }
            if self.request_count < 2 {
                return Err(CoBenchError::InvalidConfig(
                    "a sweep needs at least two measured requests per round".to_string(),
                ));
            }
            if sweep.min_interval_ns > sweep.max_interval_ns {
                return Err(CoBenchError::InvalidConfig(format!(
                    "sweep minimum {} exceeds maximum {}",
                    sweep.min_interval_ns, sweep.max_interval_ns
                )));
            }
        }
        Ok(())
    }
}
