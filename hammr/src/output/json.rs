use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write as _;
use std::path::Path;

use hammr_core::{RunMetrics, RunSnapshot, Scenario};

use super::OutputFormatter;
use crate::cli::RunArgs;

pub(crate) struct JsonOutput;

impl OutputFormatter for JsonOutput {
    fn print_header(&self, _args: &RunArgs, _scenarios: &[Scenario]) {}

    fn print_summary(
        &self,
        metrics: &RunMetrics,
        snapshot: &RunSnapshot,
        report_path: &Path,
    ) -> anyhow::Result<()> {
        let line = build_summary_line(metrics, snapshot, report_path);
        emit_json_line(&line);
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct JsonSummaryLine {
    pub kind: &'static str,

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

    pub status_counts: BTreeMap<String, u64>,
    pub error_counts: BTreeMap<String, u64>,

    pub report_path: String,
}

fn build_summary_line(
    metrics: &RunMetrics,
    snapshot: &RunSnapshot,
    report_path: &Path,
) -> JsonSummaryLine {
    JsonSummaryLine {
        kind: "summary",

        total_requests: metrics.total_requests,
        success_requests: metrics.success_requests,
        error_requests: metrics.error_requests,
        error_rate: metrics.error_rate,
        rps: metrics.rps,

        latency_avg_ms: metrics.latency_avg_ms,
        latency_p50_ms: metrics.latency_p50_ms,
        latency_p90_ms: metrics.latency_p90_ms,
        latency_p95_ms: metrics.latency_p95_ms,
        latency_p99_ms: metrics.latency_p99_ms,
        latency_max_ms: metrics.latency_max_ms,

        status_counts: snapshot
            .status_counts
            .iter()
            .map(|(code, count)| (code.to_string(), *count))
            .collect(),
        error_counts: snapshot.error_counts.clone(),

        report_path: report_path.display().to_string(),
    }
}

fn emit_json_line<T: Serialize>(line: &T) {
    let mut out = std::io::stdout().lock();
    if serde_json::to_writer(&mut out, line).is_ok() {
        let _ = writeln!(out);
    }
}
