//! Coordinated-omission correction.
//!
//! A client blocked on a slow request cannot issue the requests that should have
//! arrived meanwhile, so the recorded service times miss the queueing those requests
//! would have seen. The scheme below replays the observed processing times through
//! an idealized single FIFO server fed at the recorded arrival times:
//!
//! ```text
//! start[0] = arrival[0]
//! start[i] = max(start[i-1] + processing[i-1], arrival[i]) + extra[i]
//! estimated[i] = start[i] - arrival[i] + processing[i]        for i >= 1
//! ```
//!
//! `extra[i]` is zero, a fixed dequeue upper bound, or a known per-request dequeue
//! time depending on [`DequeueModel`]. The first request has no predecessor and is
//! left out of the estimate.

use cobench_common::{CoBenchError, Result};

/// What is known about dequeue time when reconstructing start times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DequeueModel<'a> {
    /// Nothing known; assume requests start the instant they are eligible.
    Zero,
    /// Dequeue never takes longer than this many nanoseconds.
    UpperBound(i64),
    /// Measured dequeue time of every request, same length as the arrivals.
    Known(&'a [i64]),
}

/// Estimated service times assuming zero dequeue time. Length `n - 1`.
pub fn estimate_service_times(arrivals: &[i64], processing: &[i64]) -> Result<Vec<i64>> {
    estimate_service_times_with(arrivals, processing, DequeueModel::Zero)
}

/// Estimated service times under the given dequeue model. Length `n - 1`.
pub fn estimate_service_times_with(
    arrivals: &[i64],
    processing: &[i64],
    model: DequeueModel<'_>,
) -> Result<Vec<i64>> {
    let starts = reconstruct_start_times(arrivals, processing, model)?;
    Ok((1..arrivals.len())
        .map(|i| starts[i] - arrivals[i] + processing[i])
        .collect())
}

/// Start times of the idealized FIFO replay. Length `n`.
pub fn reconstruct_start_times(
    arrivals: &[i64],
    processing: &[i64],
    model: DequeueModel<'_>,
) -> Result<Vec<i64>> {
    check_len(arrivals.len(), processing.len())?;
    if let DequeueModel::Known(dequeue) = model {
        check_len(arrivals.len(), dequeue.len())?;
    }

    let Some(&first) = arrivals.first() else {
        return Ok(Vec::new());
    };

    let mut starts = Vec::with_capacity(arrivals.len());
    let mut start = first;
    starts.push(start);

    for i in 1..arrivals.len() {
        let arrival = arrivals[i];
        let prev_finish = start + processing[i - 1];
        start = if prev_finish > arrival { prev_finish } else { arrival };
        start += match model {
            DequeueModel::Zero => 0,
            DequeueModel::UpperBound(bound) => bound,
            DequeueModel::Known(dequeue) => dequeue[i],
        };
        starts.push(start);
    }

    Ok(starts)
}

fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(CoBenchError::LengthMismatch { expected, actual });
    }
    Ok(())
}
