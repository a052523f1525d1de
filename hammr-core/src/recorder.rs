use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::executor::Outcome;

/// Final aggregated contents of a run.
///
/// `samples_ms` holds one latency entry per HTTP response (transport
/// failures never contribute a sample), so
/// `samples_ms.len() == sum(status_counts)` always holds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSnapshot {
    pub samples_ms: Vec<f64>,
    pub status_counts: BTreeMap<u16, u64>,
    pub error_counts: BTreeMap<String, u64>,
}

impl RunSnapshot {
    pub fn total_requests(&self) -> u64 {
        let status: u64 = self.status_counts.values().sum();
        let errors: u64 = self.error_counts.values().sum();
        status + errors
    }
}

/// Shared accumulator for worker results.
///
/// A single mutex domain guards the sample vector and both count maps, so
/// each `record*` call is atomic with respect to every other: no lost
/// updates, no torn counters.
#[derive(Debug, Default)]
pub struct RunRecorder {
    inner: Mutex<RunSnapshot>,
}

impl RunRecorder {
    pub fn record_response(&self, elapsed: Duration, status: u16) {
        let ms = elapsed.as_secs_f64() * 1000.0;

        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        inner.samples_ms.push(ms);
        *inner.status_counts.entry(status).or_insert(0) += 1;
    }

    pub fn record_transport_error(&self, kind: &str) {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *inner.error_counts.entry(kind.to_string()).or_insert(0) += 1;
    }

    pub fn record(&self, outcome: &Outcome) {
        match outcome {
            Outcome::Response { status, elapsed } => self.record_response(*elapsed, *status),
            Outcome::TransportError { kind } => self.record_transport_error(&kind.to_string()),
        }
    }

    /// Copy out the accumulated results.
    ///
    /// Only meaningful once every worker has been joined; the driver
    /// enforces that ordering.
    pub fn snapshot(&self) -> RunSnapshot {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}
