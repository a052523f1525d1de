use std::sync::Arc;

use anyhow::Context as _;

use hammr_core::{Catalog, HttpClient, RunOptions, TlsMode};

use crate::cli::RunArgs;
use crate::output;
use crate::report::{self, Report};

pub async fn run(args: RunArgs) -> anyhow::Result<()> {
    let out = output::formatter(args.output);

    let catalog = Arc::new(Catalog::builtin());

    let tls = if args.insecure {
        TlsMode::Insecure
    } else {
        TlsMode::Verify
    };
    let client = Arc::new(
        HttpClient::new(Some(HttpClient::DEFAULT_CONNECT_TIMEOUT), tls)
            .context("failed to build http client")?,
    );

    out.print_header(&args, catalog.scenarios());

    let opts = RunOptions {
        base_url: args.base_url.clone(),
        duration: args.duration,
        concurrency: args.concurrency,
        timeout: args.timeout,
    };

    let snapshot = hammr_core::run(client, catalog, opts)
        .await
        .context("load run failed")?;
    let metrics = hammr_core::summarize(&snapshot, args.duration);

    let report = Report::new(&args, &metrics, &snapshot);
    let path = report::write_report(&args.out_dir, &report).await?;

    out.print_summary(&metrics, &snapshot, &path)?;

    Ok(())
}
