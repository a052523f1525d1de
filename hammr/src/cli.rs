use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

fn parse_duration(input: &str) -> Result<Duration, String> {
    let s = input.trim();
    if s.is_empty() {
        return Err("duration cannot be empty (expected e.g. 10s, 250ms, 1m)".to_string());
    }

    let number_end = s
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map_or(s.len(), |(idx, _)| idx);

    if number_end == 0 {
        return Err(format!(
            "invalid duration '{s}' (expected e.g. 10s, 250ms, 1m)"
        ));
    }

    let (number_str, unit_str) = s.split_at(number_end);
    let value: u64 = number_str
        .parse()
        .map_err(|_| format!("invalid duration '{s}' (expected e.g. 10s, 250ms, 1m)"))?;

    let unit = unit_str.trim();
    match unit {
        "" | "s" | "sec" | "secs" | "second" | "seconds" => Ok(Duration::from_secs(value)),
        "ms" | "msec" | "msecs" | "millisecond" | "milliseconds" => {
            Ok(Duration::from_millis(value))
        }
        "m" | "min" | "mins" | "minute" | "minutes" => {
            let secs = value
                .checked_mul(60)
                .ok_or_else(|| format!("duration '{s}' is too large"))?;
            Ok(Duration::from_secs(secs))
        }
        "h" | "hr" | "hrs" | "hour" | "hours" => {
            let secs = value
                .checked_mul(60)
                .and_then(|v| v.checked_mul(60))
                .ok_or_else(|| format!("duration '{s}' is too large"))?;
            Ok(Duration::from_secs(secs))
        }
        _ => Err(format!(
            "invalid duration '{s}' (expected e.g. 10s, 250ms, 1m)"
        )),
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary.
    HumanReadable,
    /// Emit the summary as a single JSON line to stdout.
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "hammr",
    author,
    version,
    about = "Fixed-scenario HTTP load generator",
    long_about = "hammr drives a target service with a weighted mix of request scenarios for a fixed duration and reports throughput, latency percentiles, and error breakdowns.\n\nEvery run also writes a timestamped JSON report into the output directory.",
    after_help = "Examples:\n  hammr run\n  hammr run --base-url https://staging.example.com --duration 1m --concurrency 50\n  hammr run --base-url https://localhost:8443 --insecure --output json\n\nDocs: https://github.com/nogcio/hammr"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a load test against the target base URL
    #[command(
        long_about = "Run the builtin scenario mix against the target for the configured duration.\n\nPer-request failures are counted, never fatal; the run always produces a report."
    )]
    Run(RunArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Base URL of the target service
    #[arg(long, default_value = "http://localhost:8080")]
    pub base_url: String,

    /// Test duration (e.g. 30s, 250ms, 1m)
    #[arg(long, value_parser = parse_duration, default_value = "30s")]
    pub duration: Duration,

    /// Number of concurrent workers
    #[arg(long, default_value_t = 20)]
    pub concurrency: u32,

    /// Per-request timeout (e.g. 5s, 500ms)
    #[arg(long, value_parser = parse_duration, default_value = "5s")]
    pub timeout: Duration,

    /// Disable TLS certificate verification (for local/self-signed HTTPS)
    #[arg(long)]
    pub insecure: bool,

    /// Directory for JSON reports (created if missing)
    #[arg(long, default_value = "results")]
    pub out_dir: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::HumanReadable)]
    pub output: OutputFormat,
}
