use cobench_common::LoadSpec;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

use crate::config::NANOS_PER_MILLI;

/// Generator of inter-arrival gaps for the open-model schedule.
///
/// | Load        | Gap between consecutive arrivals          |
/// |-------------|-------------------------------------------|
/// | Steady      | the configured interval, every time       |
/// | Exponential | exponential sample with the configured mean |
#[derive(Debug, Clone)]
pub enum Load {
    Steady { interval_ns: u64 },
    Exponential { mean_ns: u64, rng: StdRng },
}

impl Load {
    pub fn steady(interval_ns: u64) -> Self {
        Load::Steady { interval_ns }
    }

    /// Poisson arrivals with `mean_ns` between requests. A seed makes the sequence reproducible.
    pub fn exponential(mean_ns: u64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Load::Exponential { mean_ns, rng }
    }

    pub fn from_spec(spec: &LoadSpec, seed: Option<u64>) -> Self {
        match *spec {
            LoadSpec::Steady { interval_ns } => Load::steady(interval_ns),
            LoadSpec::Exponential { mean_ns } => Load::exponential(mean_ns, seed),
        }
    }

    /// Gap in nanoseconds between the previous arrival and the next one.
    pub fn next_relative_time_ns(&mut self) -> u64 {
        match self {
            Load::Steady { interval_ns } => *interval_ns,
            Load::Exponential { mean_ns, rng } => {
                let mut u: f64 = rng.gen();
                while u >= 1.0 {
                    u = rng.gen();
                }
                exponential_interval(*mean_ns, u)
            }
        }
    }
}

/// Inverse-transform sample of an exponential distribution: `round(-mean * ln(1 - u))`.
///
/// `u` must lie in `[0, 1)`.
pub fn exponential_interval(mean_ns: u64, u: f64) -> u64 {
    let sample = -(mean_ns as f64) * (1.0 - u).ln();
    // float-to-int `as` saturates, so an extreme tail sample cannot wrap
    sample.round() as u64
}

/// Description of the load `spec` would build, without seeding a generator.
pub fn describe(spec: &LoadSpec) -> String {
    match *spec {
        LoadSpec::Steady { interval_ns } => steady_description(interval_ns),
        LoadSpec::Exponential { mean_ns } => exponential_description(mean_ns),
    }
}

fn steady_description(interval_ns: u64) -> String {
    format!("steady load every {} ms", interval_ns as f64 / NANOS_PER_MILLI)
}

fn exponential_description(mean_ns: u64) -> String {
    format!("Poisson process with mean arrival time of {} ms", mean_ns as f64 / NANOS_PER_MILLI)
}

impl fmt::Display for Load {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            Load::Steady { interval_ns } => steady_description(*interval_ns),
            Load::Exponential { mean_ns, .. } => exponential_description(*mean_ns),
        };
        f.write_str(&description)
    }
}
