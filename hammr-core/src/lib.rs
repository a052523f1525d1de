mod error;
mod executor;
mod recorder;
mod runner;
mod scenario;
mod summary;

pub use error::{Error, Result};
pub use executor::{Outcome, execute};
pub use recorder::{RunRecorder, RunSnapshot};
pub use runner::{RunOptions, run};
pub use scenario::{Catalog, Scenario};
pub use summary::{RunMetrics, percentile, summarize};

pub use hammr_http::{HttpClient, HttpTransportErrorKind, TlsMode};
pub use http::Method;
