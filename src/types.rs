//! Data types for the record store client

use serde_json::{json, Value};

/// Identifies a record in the remote store
///
/// A coordinate always names a keyspace and a column family; the key is
/// optional. A coordinate without a key addresses the column family as a
/// whole. The remote distinguishes "no key" from an explicit empty-string
/// key, so the two are kept distinct here as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordCoordinate {
    /// Top-level namespace grouping column families
    pub keyspace: String,
    /// Named collection of records within the keyspace
    pub column_family: String,
    /// Record key within the column family; `None` addresses the whole collection
    pub key: Option<String>,
}

impl RecordCoordinate {
    /// Coordinate of a single record
    ///
    /// # Example
    /// ```
    /// use record_store_client::RecordCoordinate;
    /// let coord = RecordCoordinate::record("users", "profiles", "alice");
    /// assert_eq!(coord.key.as_deref(), Some("alice"));
    /// ```
    pub fn record(
        keyspace: impl Into<String>,
        column_family: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            keyspace: keyspace.into(),
            column_family: column_family.into(),
            key: Some(key.into()),
        }
    }

    /// Coordinate of a whole column family (no key)
    pub fn collection(keyspace: impl Into<String>, column_family: impl Into<String>) -> Self {
        Self {
            keyspace: keyspace.into(),
            column_family: column_family.into(),
            key: None,
        }
    }
}

/// Classified outcome of one completed operation
///
/// Produced atomically once the response stream completes: exactly one
/// variant per call, never on a partial body.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationResult {
    /// The remote answered 200. The payload is the decoded response body,
    /// or JSON `null` when the body was empty.
    Success(Value),
    /// The remote answered 404: the record (or collection) does not
    /// exist. Distinct from `Success(Value::Null)`.
    NotFound,
    /// The remote answered with a status outside the 200/404 contract
    RemoteError {
        /// HTTP status code as received
        status: u16,
        /// Human-readable description carrying the status code
        message: String,
    },
}

impl OperationResult {
    /// Returns true if the operation succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, OperationResult::Success(_))
    }

    /// Returns true if the record was absent
    pub fn is_not_found(&self) -> bool {
        matches!(self, OperationResult::NotFound)
    }

    /// Payload reference, if the operation succeeded
    pub fn value(&self) -> Option<&Value> {
        match self {
            OperationResult::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Payload by value, if the operation succeeded
    pub fn into_value(self) -> Option<Value> {
        match self {
            OperationResult::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Collapse the result into the bare JSON shape of the remote
    /// convention: the success payload as-is, `null` for an absent
    /// record, and an `{"error": ...}` object for a remote failure.
    ///
    /// Useful for callers that only want a JSON payload and no variant
    /// handling.
    pub fn into_json(self) -> Value {
        match self {
            OperationResult::Success(value) => value,
            OperationResult::NotFound => Value::Null,
            OperationResult::RemoteError { message, .. } => json!({ "error": message }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_coordinate_constructors() {
        let record = RecordCoordinate::record("ks", "cf", "k");
        assert_eq!(record.keyspace, "ks");
        assert_eq!(record.column_family, "cf");
        assert_eq!(record.key.as_deref(), Some("k"));

        let collection = RecordCoordinate::collection("ks", "cf");
        assert_eq!(collection.key, None);
    }

    #[test]
    fn test_empty_key_is_not_absent_key() {
        let empty = RecordCoordinate::record("ks", "cf", "");
        let absent = RecordCoordinate::collection("ks", "cf");
        assert_ne!(empty, absent);
        assert_eq!(empty.key.as_deref(), Some(""));
    }

    #[test]
    fn test_result_accessors() {
        let success = OperationResult::Success(json!({"a": 1}));
        assert!(success.is_success());
        assert!(!success.is_not_found());
        assert_eq!(success.value(), Some(&json!({"a": 1})));

        let missing = OperationResult::NotFound;
        assert!(missing.is_not_found());
        assert_eq!(missing.value(), None);
        assert_eq!(missing.into_value(), None);
    }

    #[test]
    fn test_into_json_collapses_variants() {
        assert_eq!(
            OperationResult::Success(json!([1, 2])).into_json(),
            json!([1, 2])
        );
        assert_eq!(OperationResult::NotFound.into_json(), Value::Null);
        assert_eq!(
            OperationResult::RemoteError {
                status: 500,
                message: "Invalid remote status code: 500".to_string(),
            }
            .into_json(),
            json!({"error": "Invalid remote status code: 500"})
        );
    }

    #[test]
    fn test_success_null_is_not_not_found() {
        let null_payload = OperationResult::Success(Value::Null);
        assert!(null_payload.is_success());
        assert_ne!(null_payload, OperationResult::NotFound);
        // Both collapse to the same legacy JSON, but stay distinct variants.
        assert_eq!(null_payload.into_json(), OperationResult::NotFound.into_json());
    }
}
