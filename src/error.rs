//! Error types for the record store client

use thiserror::Error;

/// Errors that can occur when talking to the remote record store
///
/// Absence of a record is not an error; it is reported as
/// [`crate::OperationResult::NotFound`].
#[derive(Error, Debug)]
pub enum Error {
    /// The remote answered with a status outside the 200/404 contract.
    /// The plain operations report this as
    /// [`crate::OperationResult::RemoteError`]; the typed accessors
    /// surface it here instead.
    #[error("Remote error (status {status}): {message}")]
    Remote {
        /// HTTP status code
        status: u16,
        /// Human-readable description carrying the status code
        message: String,
    },

    /// Network or connection error; no HTTP status was received
    #[error("Transport error: {0}")]
    Transport(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Request timeout
    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Request construction failure
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;
