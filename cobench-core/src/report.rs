use cobench_common::{CoBenchError, Result};
use tracing::warn;

use crate::correction::estimate_service_times;
use crate::indicator::Indicator;
use crate::recording::Recording;
use crate::timings::Timings;

/// Indicator names, also used to look series up by name.
pub mod names {
    pub const IDLE: &str = "idle time";
    pub const WAIT: &str = "wait time";
    pub const DEQUEUE: &str = "dequeue time";
    pub const PROCESSING: &str = "processing time";
    pub const GROSS_PROCESSING: &str = "gross processing time";
    pub const SERVICE: &str = "service time";
    pub const ARRIVAL_DIFF: &str = "arrival diff";
    pub const CALCULATED_SERVICE: &str = "calculated service time";
}

/// The indicator set of one benchmark.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    indicators: Vec<Indicator>,
    anomaly_count: usize,
}

impl Report {
    /// Summarize every derived series plus the corrected service times.
    ///
    /// The per-request series must be non-empty. Arrival diff and calculated service
    /// time have one sample fewer; they are left out when a single request was recorded.
    pub fn build(timings: &Timings, estimated_service: &[i64], rank: u32) -> Result<Self> {
        use names::*;

        if timings.is_empty() {
            return Err(CoBenchError::EmptySample(SERVICE.to_string()));
        }

        let per_request: [(&str, &[i64]); 6] = [
            (IDLE, timings.idle()),
            (WAIT, timings.wait()),
            (DEQUEUE, timings.dequeue()),
            (PROCESSING, timings.processing()),
            (GROSS_PROCESSING, timings.gross_processing()),
            (SERVICE, timings.service()),
        ];
        let pairwise: [(&str, &[i64]); 2] =
            [(ARRIVAL_DIFF, timings.arrival_diff()), (CALCULATED_SERVICE, estimated_service)];

        let mut indicators = Vec::with_capacity(per_request.len() + pairwise.len());
        for (name, sample) in per_request {
            indicators.push(Indicator::summarize(name, sample, rank)?);
        }
        for (name, sample) in pairwise {
            if sample.is_empty() {
                warn!(indicator = name, "not enough requests to summarize, skipping");
                continue;
            }
            indicators.push(Indicator::summarize(name, sample, rank)?);
        }

        let anomalies = timings.anomalies();
        if !anomalies.is_empty() {
            warn!(count = anomalies.len(), "timing anomalies detected, affected indicators are flagged");
            indicators = indicators
                .into_iter()
                .map(|indicator| {
                    let affected = anomalies
                        .iter()
                        .any(|a| a.kind.affected_series().contains(&indicator.name()));
                    if affected {
                        indicator.flag()
                    } else {
                        indicator
                    }
                })
                .collect();
        }

        Ok(Self { indicators, anomaly_count: anomalies.len() })
    }

    pub fn indicator(&self, name: &str) -> Option<&Indicator> {
        self.indicators.iter().find(|i| i.name() == name)
    }

    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    pub fn anomaly_count(&self) -> usize {
        self.anomaly_count
    }

    pub fn is_flagged(&self) -> bool {
        self.indicators.iter().any(Indicator::is_flagged)
    }
}

/// Everything derived from one measurement recording.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub timings: Timings,
    pub estimated_service: Vec<i64>,
    pub report: Report,
}

impl Analysis {
    /// Derive timings, correct service times and summarize a single recording.
    pub fn of_recording(recording: &Recording, rank: u32) -> Result<Self> {
        Self::of_recordings(std::slice::from_ref(recording), rank)
    }

    /// Same as [`Analysis::of_recording`] for independent recordings (one per worker).
    ///
    /// Every recording is processed on its own; series are concatenated only afterwards.
    pub fn of_recordings(recordings: &[Recording], rank: u32) -> Result<Self> {
        let mut parts = Vec::with_capacity(recordings.len());
        let mut estimated_service = Vec::new();
        for recording in recordings {
            let timings = Timings::calculate(recording);
            estimated_service
                .extend(estimate_service_times(recording.arrivals(), timings.processing())?);
            parts.push(timings);
        }
        let timings = Timings::concat(&parts);
        let report = Report::build(&timings, &estimated_service, rank)?;
        Ok(Self { timings, estimated_service, report })
    }
}
