use std::time::Duration;

/// Longest single sleep inside a scheduled wait; bounds how late a cancellation is noticed.
pub const MAX_SLEEP_SLICE: Duration = Duration::from_millis(10);

/// Upper bound on the rows reserved up front for a phase; longer phases grow as they record.
pub const MAX_PREALLOCATED_REQUESTS: u64 = 1 << 20;

/// Nanoseconds per millisecond, used only when converting for display.
pub const NANOS_PER_MILLI: f64 = 1_000_000.0;
