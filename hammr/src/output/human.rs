use std::fmt::Write as _;
use std::path::Path;

use hammr_core::{RunMetrics, RunSnapshot, Scenario};

use super::OutputFormatter;
use crate::cli::RunArgs;

pub(crate) struct HumanReadableOutput;

impl OutputFormatter for HumanReadableOutput {
    fn print_header(&self, args: &RunArgs, scenarios: &[Scenario]) {
        println!("target: {}", args.base_url);
        println!(
            "workers: {} duration: {:?} timeout: {:?}{}",
            args.concurrency,
            args.duration,
            args.timeout,
            if args.insecure {
                " (tls verification off)"
            } else {
                ""
            }
        );
        println!("scenarios:");
        for s in scenarios {
            println!("  {} {} (weight {})", s.method, s.path, s.weight);
        }
        println!();
    }

    fn print_summary(
        &self,
        metrics: &RunMetrics,
        snapshot: &RunSnapshot,
        report_path: &Path,
    ) -> anyhow::Result<()> {
        print!("{}", render(metrics, snapshot));
        println!("\nreport: {}", report_path.display());
        Ok(())
    }
}

pub(crate) fn render(metrics: &RunMetrics, snapshot: &RunSnapshot) -> String {
    let mut out = String::new();

    out.push_str("summary\n");
    writeln!(
        &mut out,
        "  requests: total={} success={} failed={}",
        metrics.total_requests, metrics.success_requests, metrics.error_requests
    )
    .ok();
    writeln!(&mut out, "  error_rate: {:.2}%", metrics.error_rate).ok();
    writeln!(&mut out, "  rps: {:.2}", metrics.rps).ok();
    writeln!(
        &mut out,
        "  latency: mean={:.2}ms p50={:.2}ms p90={:.2}ms p95={:.2}ms p99={:.2}ms max={:.2}ms",
        metrics.latency_avg_ms,
        metrics.latency_p50_ms,
        metrics.latency_p90_ms,
        metrics.latency_p95_ms,
        metrics.latency_p99_ms,
        metrics.latency_max_ms
    )
    .ok();

    if !snapshot.status_counts.is_empty() {
        out.push_str("\nstatus codes\n");
        for (code, count) in &snapshot.status_counts {
            writeln!(&mut out, "  {code}: {count}").ok();
        }
    }

    if !snapshot.error_counts.is_empty() {
        out.push_str("\ntransport errors\n");
        for (kind, count) in &snapshot.error_counts {
            writeln!(&mut out, "  {kind}: {count}").ok();
        }
    }

    out
}
