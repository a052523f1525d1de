use std::path::Path;

use hammr_core::{RunMetrics, RunSnapshot, Scenario};

use crate::cli::{OutputFormat, RunArgs};

mod human;
mod json;

pub(crate) trait OutputFormatter: Send + Sync {
    fn print_header(&self, args: &RunArgs, scenarios: &[Scenario]);
    fn print_summary(
        &self,
        metrics: &RunMetrics,
        snapshot: &RunSnapshot,
        report_path: &Path,
    ) -> anyhow::Result<()>;
}

pub(crate) fn formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::HumanReadable => Box::new(human::HumanReadableOutput),
        OutputFormat::Json => Box::new(json::JsonOutput),
    }
}
