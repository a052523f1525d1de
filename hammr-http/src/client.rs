use bytes::Bytes;
use http_body_util::{BodyExt as _, Full};
use hyper::Request;
use hyper::body::Incoming;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use std::time::Duration;

use super::tls::insecure_client_config;
use super::{Error, HttpRequest, HttpResponse, Result, TlsMode};

#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
}

impl HttpClient {
    /// Default TCP connect timeout.
    ///
    /// The OS-level connect timeout can be tens of seconds, which makes short
    /// runs against an unreachable target look hung. Failed connects should
    /// surface promptly so they land in the error breakdown instead.
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

    pub fn new(connect_timeout: Option<Duration>, tls: TlsMode) -> Result<Self> {
        let mut http_connector = HttpConnector::new();
        http_connector.enforce_http(false);
        http_connector.set_connect_timeout(connect_timeout);

        let https_connector = match tls {
            TlsMode::Verify => HttpsConnectorBuilder::new()
                .with_webpki_roots()
                .https_or_http()
                .enable_http1()
                .wrap_connector(http_connector),
            TlsMode::Insecure => HttpsConnectorBuilder::new()
                .with_tls_config(insecure_client_config()?)
                .https_or_http()
                .enable_http1()
                .wrap_connector(http_connector),
        };

        let inner = Client::builder(TokioExecutor::new()).build(https_connector);

        Ok(Self { inner })
    }

    pub async fn request(&self, req: HttpRequest) -> Result<HttpResponse> {
        let timeout = req.timeout;
        let parsed = url::Url::parse(&req.url).map_err(|_| Error::InvalidUrl(req.url.clone()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(Error::UnsupportedScheme(req.url));
        }

        let uri: hyper::Uri = req
            .url
            .parse()
            .map_err(|_| Error::InvalidUrl(req.url.to_string()))?;

        let request: Request<Full<Bytes>> = Request::builder()
            .method(req.method)
            .uri(uri)
            .body(Full::new(Bytes::new()))?;

        let res: hyper::Response<Incoming> = if let Some(timeout) = timeout {
            match tokio::time::timeout(timeout, self.inner.request(request)).await {
                Ok(res) => res?,
                Err(_) => return Err(Error::Timeout(timeout)),
            }
        } else {
            self.inner.request(request).await?
        };

        let (parts, body) = res.into_parts();
        let status = parts.status.as_u16();

        // Drain the body fully so measured latency covers the whole exchange.
        let body = body.collect().await?.to_bytes();

        Ok(HttpResponse { status, body })
    }

    pub async fn get(&self, url: &str) -> Result<HttpResponse> {
        self.request(HttpRequest::get(url)).await
    }
}
