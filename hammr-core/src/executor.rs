use std::time::{Duration, Instant};

use hammr_http::{HttpClient, HttpRequest, HttpTransportErrorKind};

use crate::scenario::Scenario;

/// What a single request attempt produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Any reply with a status code, 4xx/5xx included. Elapsed covers send
    /// through full body consumption.
    Response { status: u16, elapsed: Duration },

    /// The request failed before any status was received (timeout, connect
    /// failure, TLS failure, ...). Carries no latency.
    TransportError { kind: HttpTransportErrorKind },
}

/// Issue exactly one request for `scenario` against `base_url`.
///
/// No retries; a miss is just counted by the caller.
pub async fn execute(
    client: &HttpClient,
    base_url: &str,
    scenario: &Scenario,
    timeout: Duration,
) -> Outcome {
    let url = format!("{base_url}{}", scenario.path);
    let req = HttpRequest::new(scenario.method.clone(), url).with_timeout(timeout);

    let started = Instant::now();
    match client.request(req).await {
        Ok(res) => Outcome::Response {
            status: res.status,
            elapsed: started.elapsed(),
        },
        Err(err) => Outcome::TransportError {
            kind: err.transport_error_kind(),
        },
    }
}
