use std::time::Duration;

pub type Result<T> = std::result::Result<T, Error>;

/// Classification of a request that failed before any HTTP status was
/// received. The snake_case rendering is what ends up in the error-kind
/// breakdown of a run report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum HttpTransportErrorKind {
    InvalidUrl,
    UnsupportedScheme,
    RequestBuild,
    Tls,
    Connect,
    Request,
    Timeout,
    BodyRead,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("only http:// and https:// URLs are supported: {0}")]
    UnsupportedScheme(String),

    #[error("http request build failed: {0}")]
    RequestBuild(#[from] http::Error),

    #[error("tls client config failed: {0}")]
    Tls(#[from] rustls::Error),

    #[error("http request failed: {0}")]
    Request(#[from] hyper_util::client::legacy::Error),

    #[error("http request timed out after {0:?}")]
    Timeout(Duration),

    #[error("failed to read response body: {0}")]
    BodyRead(#[from] hyper::Error),
}

impl Error {
    #[must_use]
    pub fn transport_error_kind(&self) -> HttpTransportErrorKind {
        match self {
            Self::InvalidUrl(_) => HttpTransportErrorKind::InvalidUrl,
            Self::UnsupportedScheme(_) => HttpTransportErrorKind::UnsupportedScheme,
            Self::RequestBuild(_) => HttpTransportErrorKind::RequestBuild,
            Self::Tls(_) => HttpTransportErrorKind::Tls,
            // Connect failures (refused, unreachable, DNS) get their own bucket
            // so a dead target is distinguishable from a misbehaving one.
            Self::Request(err) if err.is_connect() => HttpTransportErrorKind::Connect,
            Self::Request(_) => HttpTransportErrorKind::Request,
            Self::Timeout(_) => HttpTransportErrorKind::Timeout,
            Self::BodyRead(_) => HttpTransportErrorKind::BodyRead,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn kind_labels_are_snake_case() {
        assert_eq!(HttpTransportErrorKind::Timeout.to_string(), "timeout");
        assert_eq!(HttpTransportErrorKind::Connect.to_string(), "connect");
        assert_eq!(HttpTransportErrorKind::BodyRead.to_string(), "body_read");
        assert_eq!(
            HttpTransportErrorKind::UnsupportedScheme.to_string(),
            "unsupported_scheme"
        );
    }

    #[test]
    fn timeout_maps_to_timeout_kind() {
        let err = Error::Timeout(Duration::from_secs(5));
        assert_eq!(err.transport_error_kind(), HttpTransportErrorKind::Timeout);
    }
}
