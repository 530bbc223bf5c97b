use crate::recording::Recording;

/// Data-quality problems found while deriving timings. They are reported, never fixed up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyKind {
    /// `start < arrival`: the request started before it was due.
    StartBeforeArrival,
    /// `finish < start`: the clock went backwards during the task.
    FinishBeforeStart,
    /// The request started before it became eligible.
    NegativeDequeue,
    /// `arrival < previous arrival`.
    ArrivalWentBackwards,
}

impl AnomalyKind {
    /// Indicator names whose sample contains the offending value.
    pub fn affected_series(&self) -> &'static [&'static str] {
        use crate::report::names::*;
        match self {
            AnomalyKind::StartBeforeArrival => &[IDLE, SERVICE],
            AnomalyKind::FinishBeforeStart => {
                &[PROCESSING, GROSS_PROCESSING, SERVICE, CALCULATED_SERVICE]
            }
            AnomalyKind::NegativeDequeue => &[DEQUEUE, GROSS_PROCESSING],
            AnomalyKind::ArrivalWentBackwards => &[ARRIVAL_DIFF, CALCULATED_SERVICE],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anomaly {
    pub index: usize,
    pub kind: AnomalyKind,
}

/// Per-request intervals derived from a [`Recording`].
///
/// ```text
/// idle            = start - arrival
/// dequeue         = start - arrival                        (first request)
///                 = start - max(previous finish, arrival)  (the rest)
/// wait            = idle - dequeue
/// processing      = finish - start
/// grossProcessing = processing + dequeue
/// service         = idle + processing = finish - arrival
/// arrivalDiff     = arrival - previous arrival             (all but the first)
/// ```
///
/// The previous finish is chosen only when it is strictly later than the arrival.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timings {
    idle: Vec<i64>,
    wait: Vec<i64>,
    dequeue: Vec<i64>,
    processing: Vec<i64>,
    gross_processing: Vec<i64>,
    service: Vec<i64>,
    arrival_diff: Vec<i64>,
    anomalies: Vec<Anomaly>,
}

impl Timings {
    /// Single pass over the recording; the recording is left untouched.
    pub fn calculate(recording: &Recording) -> Self {
        let n = recording.len();
        let mut timings = Timings {
            idle: Vec::with_capacity(n),
            wait: Vec::with_capacity(n),
            dequeue: Vec::with_capacity(n),
            processing: Vec::with_capacity(n),
            gross_processing: Vec::with_capacity(n),
            service: Vec::with_capacity(n),
            arrival_diff: Vec::with_capacity(n.saturating_sub(1)),
            anomalies: Vec::new(),
        };

        let mut prev_finish = i64::MIN;
        let mut prev_arrival = 0i64;

        for (i, (arrival, start, finish)) in recording.rows().enumerate() {
            let idle = start - arrival;
            let dequeue = if i == 0 {
                start - arrival
            } else {
                let arrival_diff = arrival - prev_arrival;
                if arrival_diff < 0 {
                    timings.flag(i, AnomalyKind::ArrivalWentBackwards);
                }
                timings.arrival_diff.push(arrival_diff);
                start - if prev_finish > arrival { prev_finish } else { arrival }
            };
            let wait = idle - dequeue;
            let processing = finish - start;

            if idle < 0 {
                timings.flag(i, AnomalyKind::StartBeforeArrival);
            }
            if processing < 0 {
                timings.flag(i, AnomalyKind::FinishBeforeStart);
            }
            if dequeue < 0 {
                timings.flag(i, AnomalyKind::NegativeDequeue);
            }

            timings.idle.push(idle);
            timings.wait.push(wait);
            timings.dequeue.push(dequeue);
            timings.processing.push(processing);
            timings.gross_processing.push(processing + dequeue);
            timings.service.push(idle + processing);

            prev_arrival = arrival;
            prev_finish = finish;
        }

        timings
    }

    /// Append independently derived timings back to back, e.g. one per worker.
    ///
    /// Arrival diffs are never computed across part boundaries and anomaly indices
    /// are shifted to the concatenated positions.
    pub fn concat(parts: &[Timings]) -> Self {
        let mut merged = Timings::default();
        for part in parts {
            let offset = merged.len();
            merged.idle.extend_from_slice(&part.idle);
            merged.wait.extend_from_slice(&part.wait);
            merged.dequeue.extend_from_slice(&part.dequeue);
            merged.processing.extend_from_slice(&part.processing);
            merged.gross_processing.extend_from_slice(&part.gross_processing);
            merged.service.extend_from_slice(&part.service);
            merged.arrival_diff.extend_from_slice(&part.arrival_diff);
            merged.anomalies.extend(
                part.anomalies.iter().map(|a| Anomaly { index: a.index + offset, kind: a.kind }),
            );
        }
        merged
    }

    fn flag(&mut self, index: usize, kind: AnomalyKind) {
        self.anomalies.push(Anomaly { index, kind });
    }

    pub fn len(&self) -> usize {
        self.service.len()
    }

    pub fn is_empty(&self) -> bool {
        self.service.is_empty()
    }

    pub fn idle(&self) -> &[i64] {
        &self.idle
    }

    pub fn wait(&self) -> &[i64] {
        &self.wait
    }

    pub fn dequeue(&self) -> &[i64] {
        &self.dequeue
    }

    pub fn processing(&self) -> &[i64] {
        &self.processing
    }

    pub fn gross_processing(&self) -> &[i64] {
        &self.gross_processing
    }

    pub fn service(&self) -> &[i64] {
        &self.service
    }

    pub fn arrival_diff(&self) -> &[i64] {
        &self.arrival_diff
    }

    pub fn anomalies(&self) -> &[Anomaly] {
        &self.anomalies
    }

    /// Look a series up by its indicator name (see [`crate::report::names`]).
    pub fn series(&self, name: &str) -> Option<&[i64]> {
        use crate::report::names::*;
        match name {
            IDLE => Some(&self.idle),
            WAIT => Some(&self.wait),
            DEQUEUE => Some(&self.dequeue),
            PROCESSING => Some(&self.processing),
            GROSS_PROCESSING => Some(&self.gross_processing),
            SERVICE => Some(&self.service),
            ARRIVAL_DIFF => Some(&self.arrival_diff),
            _ => None,
        }
    }
}
