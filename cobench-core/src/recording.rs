use cobench_common::{CoBenchError, Result};

/// Append-only columnar store of the raw timestamps of one phase.
///
/// Row `i` holds the ideal arrival, the actual start and the finish of the `i`-th
/// scheduled request. The three columns always have the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recording {
    arrivals: Vec<i64>,
    starts: Vec<i64>,
    finishes: Vec<i64>,
}

impl Recording {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arrivals: Vec::with_capacity(capacity),
            starts: Vec::with_capacity(capacity),
            finishes: Vec::with_capacity(capacity),
        }
    }

    /// Build a recording from existing columns, e.g. a trace captured elsewhere.
    pub fn from_columns(arrivals: Vec<i64>, starts: Vec<i64>, finishes: Vec<i64>) -> Result<Self> {
        if starts.len() != arrivals.len() {
            return Err(CoBenchError::LengthMismatch { expected: arrivals.len(), actual: starts.len() });
        }
        if finishes.len() != arrivals.len() {
            return Err(CoBenchError::LengthMismatch {
                expected: arrivals.len(),
                actual: finishes.len(),
            });
        }
        Ok(Self { arrivals, starts, finishes })
    }

    pub fn record(&mut self, arrival_ns: i64, start_ns: i64, finish_ns: i64) {
        self.arrivals.push(arrival_ns);
        self.starts.push(start_ns);
        self.finishes.push(finish_ns);
    }

    pub fn len(&self) -> usize {
        self.arrivals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrivals.is_empty()
    }

    pub fn arrivals(&self) -> &[i64] {
        &self.arrivals
    }

    pub fn starts(&self) -> &[i64] {
        &self.starts
    }

    pub fn finishes(&self) -> &[i64] {
        &self.finishes
    }

    /// `(arrival, start, finish)` rows in scheduling order.
    pub fn rows(&self) -> impl Iterator<Item = (i64, i64, i64)> + '_ {
        self.arrivals
            .iter()
            .zip(&self.starts)
            .zip(&self.finishes)
            .map(|((&a, &s), &f)| (a, s, f))
    }
}
