use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::SeedableRng as _;
use rand::rngs::SmallRng;

use hammr_http::HttpClient;

use crate::error::Result;
use crate::executor::execute;
use crate::recorder::{RunRecorder, RunSnapshot};
use crate::scenario::Catalog;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub base_url: String,
    pub duration: Duration,
    pub concurrency: u32,
    pub timeout: Duration,
}

/// Drive the target with `concurrency` workers until the deadline passes,
/// then return the aggregated results.
///
/// The deadline is computed once and checked cooperatively at iteration
/// granularity: an in-flight request is never interrupted, so wall time may
/// exceed `duration` by up to one request timeout. Workers share only the
/// recorder, the catalog, and the deadline; there is no rate limiter and no
/// ordering between them.
pub async fn run(
    client: Arc<HttpClient>,
    catalog: Arc<Catalog>,
    opts: RunOptions,
) -> Result<RunSnapshot> {
    // Nothing to drive; an empty run is a valid empty result, not an error.
    if opts.concurrency == 0 || opts.duration.is_zero() {
        return Ok(RunSnapshot::default());
    }

    let recorder = Arc::new(RunRecorder::default());
    let deadline = Instant::now() + opts.duration;
    let base_url: Arc<str> = Arc::from(opts.base_url.as_str());

    let mut handles = Vec::with_capacity(opts.concurrency as usize);
    for _ in 0..opts.concurrency {
        let client = client.clone();
        let catalog = catalog.clone();
        let recorder = recorder.clone();
        let base_url = base_url.clone();
        let timeout = opts.timeout;

        // Per-worker generator: draws stay independent without contending on
        // a shared RNG.
        let mut rng = SmallRng::from_rng(&mut rand::rng());

        handles.push(tokio::spawn(async move {
            while Instant::now() < deadline {
                let scenario = catalog.pick(&mut rng);
                let outcome = execute(&client, &base_url, scenario, timeout).await;
                recorder.record(&outcome);
            }
        }));
    }

    for handle in handles {
        handle.await?;
    }

    Ok(recorder.snapshot())
}
