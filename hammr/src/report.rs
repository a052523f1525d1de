use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::Context as _;
use serde::Serialize;

use hammr_core::{RunMetrics, RunSnapshot};

use crate::cli::RunArgs;

#[derive(Debug, Serialize)]
pub(crate) struct ReportMetrics {
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

impl From<&RunMetrics> for ReportMetrics {
    fn from(m: &RunMetrics) -> Self {
        Self {
            total_requests: m.total_requests,
            success_requests: m.success_requests,
            error_requests: m.error_requests,
            error_rate: m.error_rate,
            rps: m.rps,
            latency_avg_ms: m.latency_avg_ms,
            latency_p50_ms: m.latency_p50_ms,
            latency_p90_ms: m.latency_p90_ms,
            latency_p95_ms: m.latency_p95_ms,
            latency_p99_ms: m.latency_p99_ms,
            latency_max_ms: m.latency_max_ms,
        }
    }
}

/// The persisted run report: configuration echo, metrics, and the raw
/// status/error breakdowns. BTreeMaps keep the serialized output stably
/// ordered.
#[derive(Debug, Serialize)]
pub(crate) struct Report {
    pub timestamp_utc: String,
    pub base_url: String,
    pub duration_s: u64,
    pub concurrency: u32,
    pub timeout_s: f64,
    pub insecure: bool,
    pub metrics: ReportMetrics,
    pub status_counts: BTreeMap<String, u64>,
    pub error_counts: BTreeMap<String, u64>,
}

impl Report {
    pub fn new(args: &RunArgs, metrics: &RunMetrics, snapshot: &RunSnapshot) -> Self {
        Self {
            timestamp_utc: utc_stamp(SystemTime::now()),
            base_url: args.base_url.clone(),
            duration_s: args.duration.as_secs(),
            concurrency: args.concurrency,
            timeout_s: args.timeout.as_secs_f64(),
            insecure: args.insecure,
            metrics: ReportMetrics::from(metrics),
            status_counts: snapshot
                .status_counts
                .iter()
                .map(|(code, count)| (code.to_string(), *count))
                .collect(),
            error_counts: snapshot.error_counts.clone(),
        }
    }

    pub fn file_name(&self) -> String {
        format!("load_test_{}.json", self.timestamp_utc)
    }
}

/// Compact UTC stamp (`YYYYMMDDTHHMMSSZ`) for report file names.
fn utc_stamp(now: SystemTime) -> String {
    humantime::format_rfc3339_seconds(now)
        .to_string()
        .chars()
        .filter(|c| *c != '-' && *c != ':')
        .collect()
}

pub(crate) async fn write_report(out_dir: &Path, report: &Report) -> anyhow::Result<PathBuf> {
    tokio::fs::create_dir_all(out_dir)
        .await
        .with_context(|| format!("failed to create report dir: {}", out_dir.display()))?;

    let path = out_dir.join(report.file_name());
    let json = serde_json::to_vec_pretty(report).context("failed to encode report")?;
    tokio::fs::write(&path, json)
        .await
        .with_context(|| format!("failed to write report: {}", path.display()))?;

    Ok(path)
}
