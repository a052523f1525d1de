use std::time::Duration;

use crate::recorder::RunSnapshot;

/// Aggregate statistics for a completed run.
///
/// `error_requests` counts both non-2xx/3xx responses and transport
/// failures; latency fields only reflect requests that produced a response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunMetrics {
    pub total_requests: u64,
    pub success_requests: u64,
    pub error_requests: u64,
    pub error_rate: f64,
    pub rps: f64,
    pub latency_avg_ms: f64,
    pub latency_p50_ms: f64,
    pub latency_p90_ms: f64,
    pub latency_p95_ms: f64,
    pub latency_p99_ms: f64,
    pub latency_max_ms: f64,
}

/// Pure computation over the final snapshot. Calling it twice on the same
/// snapshot yields identical results.
#[must_use]
pub fn summarize(snapshot: &RunSnapshot, duration: Duration) -> RunMetrics {
    let status_total: u64 = snapshot.status_counts.values().sum();
    let error_total: u64 = snapshot.error_counts.values().sum();
    let total_requests = status_total + error_total;

    let mut success_requests = 0u64;
    for (code, count) in &snapshot.status_counts {
        if (200..400).contains(code) {
            success_requests += count;
        }
    }
    let error_requests = total_requests - success_requests;

    let error_rate = if total_requests == 0 {
        0.0
    } else {
        (error_requests as f64) / (total_requests as f64) * 100.0
    };

    let secs = duration.as_secs_f64();
    let rps = if secs > 0.0 {
        (total_requests as f64) / secs
    } else {
        0.0
    };

    let samples = &snapshot.samples_ms;
    let latency_avg_ms = if samples.is_empty() {
        0.0
    } else {
        samples.iter().sum::<f64>() / (samples.len() as f64)
    };
    let latency_max_ms = samples.iter().copied().fold(0.0, f64::max);

    RunMetrics {
        total_requests,
        success_requests,
        error_requests,
        error_rate,
        rps,
        latency_avg_ms,
        latency_p50_ms: percentile(samples, 50.0),
        latency_p90_ms: percentile(samples, 90.0),
        latency_p95_ms: percentile(samples, 95.0),
        latency_p99_ms: percentile(samples, 99.0),
        latency_max_ms,
    }
}

/// Linear-interpolation order statistic.
///
/// Empty input yields 0; `percent <= 0` yields the minimum and
/// `percent >= 100` the maximum.
#[must_use]
pub fn percentile(samples: &[f64], percent: f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    if percent <= 0.0 {
        return sorted[0];
    }
    if percent >= 100.0 {
        return sorted[sorted.len() - 1];
    }

    let k = ((sorted.len() - 1) as f64) * (percent / 100.0);
    let f = k.floor() as usize;
    let c = (f + 1).min(sorted.len() - 1);

    if f == c {
        return sorted[f];
    }

    sorted[f] * ((c as f64) - k) + sorted[c] * (k - (f as f64))
}
