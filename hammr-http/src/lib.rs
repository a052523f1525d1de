#![forbid(unsafe_code)]

mod client;
mod error;
mod tls;
mod types;

pub use client::HttpClient;
pub use error::{Error, HttpTransportErrorKind, Result};
pub use tls::TlsMode;
pub use types::{HttpRequest, HttpResponse};
