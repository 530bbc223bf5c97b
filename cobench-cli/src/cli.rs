use clap::{Parser, ValueEnum};
use cobench_common::{
    BenchConfig, CoBenchError, LoadSpec, Result, SweepSpec, TaskSpec, DEFAULT_PERCENTILE_RANK,
};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LoadKind {
    Steady,
    Exponential,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TaskKind {
    Counter,
    Fibonacci,
    RandomizedFibonacci,
    Spin,
}

#[derive(Parser, Debug)]
#[command(name = "cobench", about = "Open-model latency benchmark with coordinated-omission correction")]
pub struct Args {
    /// JSON configuration file; replaces the load, task and count flags below
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Inter-arrival distribution
    #[arg(long, value_enum, default_value_t = LoadKind::Exponential)]
    pub load: LoadKind,

    /// Steady interval or exponential mean between arrivals (microseconds)
    #[arg(long, default_value_t = 30_000)]
    pub interval_us: u64,

    /// Unit of work executed per request
    #[arg(long, value_enum, default_value_t = TaskKind::Fibonacci)]
    pub task: TaskKind,

    /// Fibonacci index (minimal index for randomized-fibonacci)
    #[arg(long, default_value_t = 1_000_000)]
    pub fib_index: u64,

    /// Busy-spin duration for the spin task (microseconds)
    #[arg(long, default_value_t = 100)]
    pub spin_us: u64,

    /// Measured requests
    #[arg(long, default_value_t = 1_000)]
    pub requests: u64,

    /// Warm-up requests, discarded
    #[arg(long, default_value_t = 1_000)]
    pub warmup: u64,

    /// Percentile rank reported by every indicator (1-100)
    #[arg(long, default_value_t = DEFAULT_PERCENTILE_RANK)]
    pub percentile: u32,

    /// Write the raw per-request table (semicolon separated) to this file
    #[arg(long)]
    pub raw_csv: Option<PathBuf>,

    /// Independent benchmark loops, each on its own thread
    #[arg(long, default_value_t = 1)]
    pub workers: usize,

    /// Seed for the load and randomized tasks
    #[arg(long)]
    pub seed: Option<u64>,

    /// Sweep: smallest steady interval (microseconds)
    #[arg(long)]
    pub sweep_min_us: Option<u64>,

    /// Sweep: largest steady interval (microseconds)
    #[arg(long)]
    pub sweep_max_us: Option<u64>,

    /// Sweep: interval increment (microseconds)
    #[arg(long)]
    pub sweep_step_us: Option<u64>,

    /// Exit with code 2 when timing anomalies were detected
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Log at debug level regardless of RUST_LOG
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}

impl Args {
    /// Resolve the flags (or the configuration file) into a validated configuration.
    pub fn to_config(&self) -> Result<BenchConfig> {
        let mut config = match &self.config {
            Some(path) => BenchConfig::from_file(path)?,
            None => self.config_from_flags()?,
        };
        if self.raw_csv.is_some() {
            config.raw_csv = self.raw_csv.clone();
        }
        config.validate()?;
        Ok(config)
    }

    fn config_from_flags(&self) -> Result<BenchConfig> {
        let interval_ns = micros_to_nanos(self.interval_us);
        let load = match self.load {
            LoadKind::Steady => LoadSpec::Steady { interval_ns },
            LoadKind::Exponential => LoadSpec::Exponential { mean_ns: interval_ns },
        };
        let task = match self.task {
            TaskKind::Counter => TaskSpec::Counter,
            TaskKind::Fibonacci => TaskSpec::Fibonacci { index: self.fib_index },
            TaskKind::RandomizedFibonacci => TaskSpec::RandomizedFibonacci { min_index: self.fib_index },
            TaskKind::Spin => TaskSpec::Spin { duration_ns: micros_to_nanos(self.spin_us) },
        };

        let mut config = BenchConfig::new(load, task, self.requests, self.warmup);
        config.percentile_rank = self.percentile;
        config.workers = self.workers;
        config.seed = self.seed;
        config.sweep = self.sweep()?;
        Ok(config)
    }

    fn sweep(&self) -> Result<Option<SweepSpec>> {
        match (self.sweep_min_us, self.sweep_max_us, self.sweep_step_us) {
            (None, None, None) => Ok(None),
            (Some(min), Some(max), Some(step)) => Ok(Some(SweepSpec {
                min_interval_ns: micros_to_nanos(min),
                max_interval_ns: micros_to_nanos(max),
                step_ns: micros_to_nanos(step),
            })),
            _ => Err(CoBenchError::InvalidConfig(
                "--sweep-min-us, --sweep-max-us and --sweep-step-us must be given together"
                    .to_string(),
            )),
        }
    }
}

fn micros_to_nanos(us: u64) -> u64 {
    us.saturating_mul(1_000)
}
