#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use hammr_core::{Catalog, HttpClient, Method, RunOptions, Scenario, TlsMode, run, summarize};
use hammr_testserver::TestServer;

fn client() -> Arc<HttpClient> {
    Arc::new(HttpClient::new(Some(Duration::from_secs(1)), TlsMode::Verify).unwrap())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn run_with_50_workers_drops_nothing() {
    let server = TestServer::start().await.unwrap();

    let opts = RunOptions {
        base_url: server.base_url().to_string(),
        duration: Duration::from_secs(2),
        concurrency: 50,
        timeout: Duration::from_secs(2),
    };

    let snapshot = run(client(), Arc::new(Catalog::builtin()), opts).await.unwrap();
    let server_seen = server.stats().requests_total();
    server.shutdown().await;

    assert!(
        snapshot.error_counts.is_empty(),
        "unexpected transport errors: {:?}",
        snapshot.error_counts
    );
    assert!(snapshot.total_requests() > 0);

    // Every recorded response contributed exactly one latency sample.
    let status_total: u64 = snapshot.status_counts.values().sum();
    assert_eq!(snapshot.samples_ms.len() as u64, status_total);
    assert_eq!(
        snapshot.status_counts.get(&200).copied().unwrap_or(0),
        status_total
    );

    // The server's own counter must agree with ours; tolerate a handful of
    // requests racing shutdown.
    let delta = server_seen.abs_diff(snapshot.total_requests());
    assert!(
        delta <= 5,
        "request totals mismatch: server_seen={server_seen} recorded={} delta={delta}",
        snapshot.total_requests()
    );

    let metrics = summarize(&snapshot, Duration::from_secs(2));
    assert_eq!(
        metrics.success_requests + metrics.error_requests,
        metrics.total_requests
    );
    assert_eq!(metrics.error_requests, 0);
    assert!(metrics.rps > 0.0);
    assert!(metrics.latency_p50_ms > 0.0);
    assert!(metrics.latency_max_ms >= metrics.latency_p99_ms);
}

#[tokio::test(flavor = "multi_thread")]
async fn http_error_statuses_still_sample_latency() {
    let server = TestServer::start().await.unwrap();

    let catalog = Arc::new(
        Catalog::new(vec![Scenario::new(
            Method::GET,
            hammr_testserver::PATH_TEAPOT,
            1,
        )])
        .unwrap(),
    );

    let opts = RunOptions {
        base_url: server.base_url().to_string(),
        duration: Duration::from_millis(500),
        concurrency: 4,
        timeout: Duration::from_secs(2),
    };

    let snapshot = run(client(), catalog, opts).await.unwrap();
    server.shutdown().await;

    assert!(snapshot.error_counts.is_empty());
    let teapots = snapshot.status_counts.get(&418).copied().unwrap_or(0);
    assert!(teapots > 0);
    assert_eq!(snapshot.samples_ms.len() as u64, teapots);

    // 4xx is an error outcome, but not a transport failure: it still
    // contributes latency samples.
    let metrics = summarize(&snapshot, Duration::from_millis(500));
    assert_eq!(metrics.success_requests, 0);
    assert_eq!(metrics.error_requests, metrics.total_requests);
    assert_eq!(metrics.error_rate, 100.0);
    assert!(metrics.latency_avg_ms > 0.0);
}

#[tokio::test(flavor = "multi_thread")]
async fn timed_out_requests_leave_no_samples() {
    let server = TestServer::start().await.unwrap();

    let catalog = Arc::new(
        Catalog::new(vec![Scenario::new(
            Method::GET,
            hammr_testserver::PATH_SLOW,
            1,
        )])
        .unwrap(),
    );

    // Request timeout well under the slow route's delay: every attempt
    // must end as a transport failure.
    let opts = RunOptions {
        base_url: server.base_url().to_string(),
        duration: Duration::from_millis(600),
        concurrency: 4,
        timeout: Duration::from_millis(50),
    };

    let snapshot = run(client(), catalog, opts).await.unwrap();
    server.shutdown().await;

    assert!(snapshot.samples_ms.is_empty());
    assert!(snapshot.status_counts.is_empty());
    assert!(snapshot.error_counts.get("timeout").copied().unwrap_or(0) > 0);

    let metrics = summarize(&snapshot, Duration::from_millis(600));
    assert_eq!(metrics.success_requests, 0);
    assert_eq!(metrics.error_requests, metrics.total_requests);
    assert_eq!(metrics.error_rate, 100.0);
    assert_eq!(metrics.latency_avg_ms, 0.0);
    assert_eq!(metrics.latency_max_ms, 0.0);
}

#[tokio::test(flavor = "multi_thread")]
async fn refused_connections_are_classified_as_connect() {
    // Grab a port that nothing listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let opts = RunOptions {
        base_url: format!("http://127.0.0.1:{port}"),
        duration: Duration::from_millis(250),
        concurrency: 2,
        timeout: Duration::from_millis(500),
    };

    let snapshot = run(client(), Arc::new(Catalog::builtin()), opts).await.unwrap();

    assert!(snapshot.samples_ms.is_empty());
    assert!(snapshot.status_counts.is_empty());
    assert!(snapshot.error_counts.get("connect").copied().unwrap_or(0) > 0);
}
