use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::time::{Duration, sleep};

pub const PATH_MENU: &str = "/Menu";
pub const PATH_ANALYTICS_SUMMARY: &str = "/analytics/summary";
pub const PATH_ANALYTICS_USAGE: &str = "/analytics/usage";
pub const PATH_ANALYTICS_ERRORS: &str = "/analytics/errors";
pub const PATH_SLOW: &str = "/slow";
pub const PATH_TEAPOT: &str = "/teapot";

/// How long `/slow` sleeps before answering. Kept well above the request
/// timeouts the timeout tests configure.
pub const SLOW_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Default)]
pub struct TestServerStats {
    requests_total: Arc<AtomicU64>,
}

impl TestServerStats {
    fn inc_requests_total(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requests_total(&self) -> u64 {
        self.requests_total.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Serialize)]
struct MenuItem {
    name: &'static str,
    price_cents: u32,
}

#[derive(Debug, Serialize)]
struct AnalyticsPayload {
    metric: &'static str,
    value: u64,
}

async fn handle_menu(State(stats): State<TestServerStats>) -> Json<Vec<MenuItem>> {
    stats.inc_requests_total();

    Json(vec![
        MenuItem {
            name: "espresso",
            price_cents: 250,
        },
        MenuItem {
            name: "flat white",
            price_cents: 420,
        },
    ])
}

async fn handle_analytics_summary(State(stats): State<TestServerStats>) -> Json<AnalyticsPayload> {
    stats.inc_requests_total();
    Json(AnalyticsPayload {
        metric: "summary",
        value: 42,
    })
}

async fn handle_analytics_usage(State(stats): State<TestServerStats>) -> Json<AnalyticsPayload> {
    stats.inc_requests_total();
    Json(AnalyticsPayload {
        metric: "usage",
        value: 7,
    })
}

async fn handle_analytics_errors(State(stats): State<TestServerStats>) -> Json<AnalyticsPayload> {
    stats.inc_requests_total();
    Json(AnalyticsPayload {
        metric: "errors",
        value: 0,
    })
}

async fn handle_slow(State(stats): State<TestServerStats>) -> &'static str {
    stats.inc_requests_total();
    sleep(SLOW_DELAY).await;
    "slow"
}

async fn handle_teapot(State(stats): State<TestServerStats>) -> StatusCode {
    stats.inc_requests_total();
    StatusCode::IM_A_TEAPOT
}

pub fn router(stats: TestServerStats) -> Router {
    Router::new()
        .route(PATH_MENU, get(handle_menu))
        .route(PATH_ANALYTICS_SUMMARY, get(handle_analytics_summary))
        .route(PATH_ANALYTICS_USAGE, get(handle_analytics_usage))
        .route(PATH_ANALYTICS_ERRORS, get(handle_analytics_errors))
        .route(PATH_SLOW, get(handle_slow))
        .route(PATH_TEAPOT, get(handle_teapot))
        .with_state(stats)
}

pub struct TestServer {
    addr: SocketAddr,
    base_url: String,
    stats: TestServerStats,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl TestServer {
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let stats = TestServerStats::default();
        let app = router(stats.clone());

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let serve = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            let _ = serve.await;
        });

        let base_url = format!("http://{addr}");

        Ok(Self {
            addr,
            base_url,
            stats,
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn stats(&self) -> &TestServerStats {
        &self.stats
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }

        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if self.shutdown_tx.is_some()
            && let Some(task) = self.task.take()
        {
            task.abort();
        }
    }
}
