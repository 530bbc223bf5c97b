use cobench_common::{CoBenchError, Result};
use std::fmt;

use crate::config::NANOS_PER_MILLI;

/// Summary of one timing series: min, average, a percentile and max.
#[derive(Debug, Clone, PartialEq)]
pub struct Indicator {
    name: String,
    average: f64,
    min: i64,
    max: i64,
    percentile: i64,
    rank: u32,
    flagged: bool,
}

impl Indicator {
    /// Summarize `sample` without reordering it.
    ///
    /// The percentile is `sorted[ceil(rank * n / 100) - 1]`, computed in integers.
    /// Fails on an empty sample or a rank outside `1..=100`.
    pub fn summarize(name: impl Into<String>, sample: &[i64], rank: u32) -> Result<Self> {
        let name = name.into();
        if sample.is_empty() {
            return Err(CoBenchError::EmptySample(name));
        }
        if !(1..=100).contains(&rank) {
            return Err(CoBenchError::InvalidConfig(format!(
                "percentile rank must be within 1..=100, got {rank}"
            )));
        }

        let sum: i128 = sample.iter().map(|&v| v as i128).sum();
        let average = sum as f64 / sample.len() as f64;

        let mut sorted = sample.to_vec();
        sorted.sort_unstable();

        Ok(Self {
            name,
            average,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            percentile: sorted[percentile_index(sorted.len(), rank)],
            rank,
            flagged: false,
        })
    }

    /// Mark this indicator as computed over a sample with data-quality anomalies.
    pub fn flag(mut self) -> Self {
        self.flagged = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn average(&self) -> f64 {
        self.average
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn percentile(&self) -> i64 {
        self.percentile
    }

    pub fn rank(&self) -> u32 {
        self.rank
    }

    pub fn is_flagged(&self) -> bool {
        self.flagged
    }
}

/// Index of the `rank`-th percentile in a sorted sample of length `len` (`len >= 1`).
pub fn percentile_index(len: usize, rank: u32) -> usize {
    let rank = rank as usize;
    let ceil = (rank * len).div_ceil(100);
    ceil.max(1) - 1
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>25}: min: {:.6} ms, avg: {:.6} ms, {}%: {:.6} ms, max: {:.6} ms{}",
            self.name,
            self.min as f64 / NANOS_PER_MILLI,
            self.average / NANOS_PER_MILLI,
            self.rank,
            self.percentile as f64 / NANOS_PER_MILLI,
            self.max as f64 / NANOS_PER_MILLI,
            if self.flagged { "  [anomalous]" } else { "" }
        )
    }
}
