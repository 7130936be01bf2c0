use thiserror::Error;

use crate::store::StoreError;

/// Fatal startup/runtime errors. Operational failures (save, sync, upload)
/// never surface here; they are logged and degraded per the best-effort
/// contract.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Server error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, ServerError>;
