pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("scenario catalog must not be empty")]
    EmptyCatalog,

    #[error("scenario `{method} {path}` must have a positive weight")]
    ZeroWeight { method: String, path: String },

    #[error("task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}
