//! Error types for atlas-core

use thiserror::Error;

/// Errors raised while building envelopes or reading scan records
#[derive(Debug, Error)]
pub enum CoreError {
    /// An envelope was built without any messages
    #[error("Envelope must contain at least one message")]
    EmptyEnvelope,

    /// A decoded envelope's receive time does not match its publish time
    #[error("Envelope receive time {receive_time_ms} does not match publish time {publish_time_ms}")]
    ReceiveTimeMismatch {
        publish_time_ms: i64,
        receive_time_ms: i64,
    },

    /// IO error reading a scan source
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Scan record JSON could not be parsed
    #[error("Invalid scan record JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;
