use thiserror::Error;

/// Errors raised while bringing the server up or serving connections
///
/// Request-level failures use [`shared::AppError`]; these never reach a client.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Work directory error: {0}")]
    WorkDir(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result alias for server startup
pub type Result<T> = std::result::Result<T, ServerError>;
