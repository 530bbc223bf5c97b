use std::time::{Duration, Instant};

/// Abstraction over the monotonic time source for testability.
///
/// Timestamps are signed nanoseconds; only their differences carry meaning.
pub trait Clock: Send + Sync {
    fn now_ns(&self) -> i64;

    /// Block the calling thread for roughly `duration`. May return early.
    fn sleep(&self, duration: Duration);
}

/// Production clock backed by `Instant`, counting from the moment it was created.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ns(&self) -> i64 {
        i64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(i64::MAX)
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Offset captured once at startup so exported timestamps start near zero.
///
/// Never used for statistics, which work on raw deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeZero(i64);

impl TimeZero {
    pub fn capture(clock: &dyn Clock) -> Self {
        Self(clock.now_ns())
    }

    pub fn at(offset_ns: i64) -> Self {
        Self(offset_ns)
    }

    pub fn offset_ns(&self) -> i64 {
        self.0
    }

    /// Shift a raw timestamp so that it is relative to this time zero.
    pub fn relative(&self, timestamp_ns: i64) -> i64 {
        timestamp_ns - self.0
    }
}
