use thiserror::Error;

use crate::api::ApiError;

/// Failures surfaced by the offline subsystem.
///
/// Components catch whatever they can fall back from (the accessor falls
/// back to cache, the orchestrator skips individual assets); only failures
/// with no remaining fallback reach the caller, always as one of these
/// variants rather than a raw panic.
#[derive(Error, Debug)]
pub enum OfflineError {
    #[error("offline storage is not supported in this environment")]
    Unsupported,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("a download is already in progress")]
    DownloadInProgress,

    #[error("offline interceptor is not running")]
    InterceptorStopped,
}
