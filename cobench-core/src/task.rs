use cobench_common::TaskSpec;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

/// A unit of work driven by the benchmark loop.
///
/// The returned value is opaque. The runner passes it through `std::hint::black_box`
/// so the optimizer cannot prove the work is unused.
pub trait Task: Send {
    fn execute(&mut self) -> u64;

    /// Human-readable summary for report headers.
    fn description(&self) -> String;
}

/// Build the task described by `spec`. `seed` only affects randomized tasks.
pub fn from_spec(spec: &TaskSpec, seed: Option<u64>) -> Box<dyn Task> {
    match *spec {
        TaskSpec::Counter => Box::new(Counter::default()),
        TaskSpec::Fibonacci { index } => Box::new(Fibonacci::new(index)),
        TaskSpec::RandomizedFibonacci { min_index } => {
            Box::new(RandomizedFibonacci::new(min_index, seed))
        }
        TaskSpec::Spin { duration_ns } => Box::new(Spin::new(Duration::from_nanos(duration_ns))),
    }
}

/// Increments a counter. Cheap enough that dequeue overhead is comparable to processing.
#[derive(Debug, Default)]
pub struct Counter {
    count: u64,
}

impl Task for Counter {
    fn execute(&mut self) -> u64 {
        self.count += 1;
        self.count
    }

    fn description(&self) -> String {
        "counter increment".to_string()
    }
}

/// Computes the n-th Fibonacci number iteratively (wrapping on overflow).
#[derive(Debug)]
pub struct Fibonacci {
    index: u64,
}

impl Fibonacci {
    pub fn new(index: u64) -> Self {
        Self { index }
    }
}

impl Task for Fibonacci {
    fn execute(&mut self) -> u64 {
        fibonacci(self.index)
    }

    fn description(&self) -> String {
        format!("{}th Fibonacci number", self.index)
    }
}

/// Like [`Fibonacci`], but the index is drawn from `[min_index, 2 * min_index)` on every call
/// so repeated executions cannot be constant-folded.
#[derive(Debug)]
pub struct RandomizedFibonacci {
    min_index: u64,
    rng: StdRng,
}

impl RandomizedFibonacci {
    /// `min_index` must be positive; configuration validation rejects zero.
    pub fn new(min_index: u64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { min_index, rng }
    }

    /// Draw the next index. Exposed for deterministic testing.
    pub fn next_index(&mut self) -> u64 {
        if self.min_index == 0 {
            return 0;
        }
        self.min_index + self.rng.gen_range(0..self.min_index)
    }
}

impl Task for RandomizedFibonacci {
    fn execute(&mut self) -> u64 {
        let index = self.next_index();
        fibonacci(index)
    }

    fn description(&self) -> String {
        format!(
            "Fibonacci with index in [{}, {})",
            self.min_index,
            self.min_index.saturating_mul(2)
        )
    }
}

/// Busy-waits for a fixed duration, giving a predictable processing time.
#[derive(Debug)]
pub struct Spin {
    duration: Duration,
}

impl Spin {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

impl Task for Spin {
    fn execute(&mut self) -> u64 {
        let started = Instant::now();
        let mut spins: u64 = 0;
        while started.elapsed() < self.duration {
            std::hint::spin_loop();
            spins += 1;
        }
        spins
    }

    fn description(&self) -> String {
        format!("busy spin for {} ns", self.duration.as_nanos())
    }
}

/// The `index`-th Fibonacci number with `fib(0) = 0`, `fib(1) = 1`, wrapping on overflow.
pub fn fibonacci(index: u64) -> u64 {
    match index {
        0 => 0,
        1 => 1,
        _ => {
            let (mut prev, mut fib) = (0u64, 1u64);
            for _ in 2..=index {
                let next = prev.wrapping_add(fib);
                prev = fib;
                fib = next;
            }
            fib
        }
    }
}
