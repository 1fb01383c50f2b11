//! Response classification
//!
//! Maps a completed HTTP response (status code plus fully buffered body)
//! to an [`OperationResult`]. The client never interprets status codes
//! itself; every response lands here.

use http::StatusCode;
use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::types::OperationResult;

/// Classify a completed response.
///
/// * 200: success; the body decodes as JSON (an empty body decodes to
///   JSON `null`). A malformed body is a decode failure, not a remote
///   error.
/// * 404: absence. The body is not trusted and is ignored.
/// * anything else: a remote error carrying the numeric status code.
pub(crate) fn classify(status: StatusCode, body: &[u8]) -> Result<OperationResult> {
    match status {
        StatusCode::OK => {
            let payload = if body.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(body)?
            };
            Ok(OperationResult::Success(payload))
        }
        StatusCode::NOT_FOUND => Ok(OperationResult::NotFound),
        other => {
            debug!("Unexpected remote status: {}", other);
            Ok(OperationResult::RemoteError {
                status: other.as_u16(),
                message: format!("Invalid remote status code: {}", other.as_u16()),
            })
        }
    }
}
