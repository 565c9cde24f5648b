//! Error types for the sync layer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Endpoint {endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Response body was not the expected shape")]
    MalformedResponse,

    #[error("An operation is already in flight")]
    Busy,
}
