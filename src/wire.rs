//! Wire encoding for record store requests
//!
//! Translates an (operation, coordinate, optional value) triple into the
//! concrete HTTP request: method, percent-encoded path, headers, and body
//! bytes. Identical inputs always encode to byte-identical requests.

use bytes::Bytes;
use http::{header, Method, Request, Uri};
use http_body_util::Full;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::types::RecordCoordinate;

/// Characters kept unencoded: RFC 3986 unreserved only. Everything else
/// (including `/`, `&`, `%`, spaces, non-ASCII) gets percent-encoded, so
/// a reserved character inside a keyspace or key can never split the path
/// and the form payload stays a single field.
const ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode one path segment or form value.
fn encode_segment(s: &str) -> String {
    utf8_percent_encode(s, ENCODE_SET).to_string()
}

/// The four operations the client can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    Fetch,
    Delete,
    Create,
    Update,
}

impl Operation {
    pub(crate) fn method(self) -> Method {
        match self {
            Operation::Fetch => Method::GET,
            Operation::Delete => Method::DELETE,
            Operation::Create => Method::POST,
            Operation::Update => Method::PUT,
        }
    }
}

/// A fully encoded request, ready to hand to the transport.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WireRequest {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) content_type: Option<&'static str>,
    pub(crate) body: Bytes,
}

/// Build the request path for a coordinate: `/{ks}/{cf}/`, with `{key}/`
/// appended only when a key is present. An absent key adds nothing; an
/// explicit empty-string key adds a zero-length segment (`//`); the
/// remote treats the two differently.
pub(crate) fn record_path(coord: &RecordCoordinate) -> String {
    let mut path = format!(
        "/{}/{}/",
        encode_segment(&coord.keyspace),
        encode_segment(&coord.column_family)
    );
    if let Some(key) = &coord.key {
        path.push_str(&encode_segment(key));
        path.push('/');
    }
    path
}

/// Encode a body-less operation (Fetch, Delete).
pub(crate) fn encode_read(op: Operation, coord: &RecordCoordinate) -> WireRequest {
    WireRequest {
        method: op.method(),
        path: record_path(coord),
        content_type: None,
        body: Bytes::new(),
    }
}

/// Encode a value-carrying operation (Create, Update).
///
/// The value is serialized to JSON and shipped as the single form field
/// `v=<percent-encoded json>`.
pub(crate) fn encode_write<T>(
    op: Operation,
    coord: &RecordCoordinate,
    value: &T,
) -> Result<WireRequest>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value)?;
    let mut body = String::with_capacity(json.len() + 2);
    body.push_str("v=");
    body.push_str(&encode_segment(&json));

    Ok(WireRequest {
        method: op.method(),
        path: record_path(coord),
        content_type: Some("application/x-www-form-urlencoded"),
        body: Bytes::from(body),
    })
}

impl WireRequest {
    /// Turn the encoded request into an HTTP request against `base`.
    ///
    /// `Content-Length` is always set explicitly, to the exact body byte
    /// length (zero for body-less operations).
    pub(crate) fn into_http(self, base: &str) -> Result<Request<Full<Bytes>>> {
        let uri: Uri = format!("{}{}", base, self.path)
            .parse()
            .map_err(|e| Error::InvalidUrl(format!("Invalid request URL: {}", e)))?;

        let mut builder = Request::builder()
            .method(self.method)
            .uri(uri)
            .header(header::CONTENT_LENGTH, self.body.len());

        if let Some(content_type) = self.content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }

        builder
            .body(Full::new(self.body))
            .map_err(|e| Error::InvalidRequest(format!("Failed to build request: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::percent_decode_str;
    use serde_json::{json, Value};

    // ===== path building tests =====

    #[test]
    fn test_path_with_key() {
        let coord = RecordCoordinate::record("ks1", "cf1", "k1");
        assert_eq!(record_path(&coord), "/ks1/cf1/k1/");
    }

    #[test]
    fn test_path_without_key_has_no_trailing_segment() {
        let coord = RecordCoordinate::collection("ks1", "cf1");
        assert_eq!(record_path(&coord), "/ks1/cf1/");
    }

    #[test]
    fn test_path_differs_only_by_key_segment() {
        let with_key = record_path(&RecordCoordinate::record("ks1", "cf1", "k1"));
        let without_key = record_path(&RecordCoordinate::collection("ks1", "cf1"));
        assert_eq!(with_key, format!("{}k1/", without_key));
    }

    #[test]
    fn test_empty_key_produces_empty_segment() {
        let coord = RecordCoordinate::record("ks1", "cf1", "");
        assert_eq!(record_path(&coord), "/ks1/cf1//");
    }

    #[test]
    fn test_reserved_characters_are_encoded_per_segment() {
        let coord = RecordCoordinate::record("my ks", "cf/1", "k&2=3");
        assert_eq!(record_path(&coord), "/my%20ks/cf%2F1/k%262%3D3/");
    }

    #[test]
    fn test_non_ascii_segments_are_encoded() {
        let coord = RecordCoordinate::record("ks", "cf", "käse");
        assert_eq!(record_path(&coord), "/ks/cf/k%C3%A4se/");
    }

    // ===== operation encoding tests =====

    #[test]
    fn test_method_mapping() {
        assert_eq!(Operation::Fetch.method(), Method::GET);
        assert_eq!(Operation::Delete.method(), Method::DELETE);
        assert_eq!(Operation::Create.method(), Method::POST);
        assert_eq!(Operation::Update.method(), Method::PUT);
    }

    #[test]
    fn test_read_request_has_empty_body() {
        let coord = RecordCoordinate::record("ks1", "cf1", "k1");
        let wire = encode_read(Operation::Fetch, &coord);
        assert_eq!(wire.method, Method::GET);
        assert_eq!(wire.path, "/ks1/cf1/k1/");
        assert!(wire.body.is_empty());
        assert_eq!(wire.content_type, None);
    }

    #[test]
    fn test_write_request_body_is_form_encoded_json() {
        let coord = RecordCoordinate::collection("ks1", "cf1");
        let wire = encode_write(Operation::Create, &coord, &json!({"x": 1})).unwrap();
        assert_eq!(wire.method, Method::POST);
        assert_eq!(wire.path, "/ks1/cf1/");
        assert_eq!(&wire.body[..], b"v=%7B%22x%22%3A1%7D");
        assert_eq!(wire.content_type, Some("application/x-www-form-urlencoded"));
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let coord = RecordCoordinate::record("ks", "cf", "k");
        let value = json!({"b": 2, "a": [1, null, "x"]});
        let first = encode_write(Operation::Update, &coord, &value).unwrap();
        let second = encode_write(Operation::Update, &coord, &value).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_form_body_round_trips() {
        let coord = RecordCoordinate::record("ks", "cf", "k");
        let value = json!({
            "name": "a & b / c",
            "count": 42,
            "nested": {"flag": true, "items": [1, 2.5, null]},
        });
        let wire = encode_write(Operation::Create, &coord, &value).unwrap();

        let body = std::str::from_utf8(&wire.body).unwrap();
        let encoded = body.strip_prefix("v=").unwrap();
        let decoded = percent_decode_str(encoded).decode_utf8().unwrap();
        let round_tripped: Value = serde_json::from_str(&decoded).unwrap();
        assert_eq!(round_tripped, value);
    }

    // ===== http request building tests =====

    #[test]
    fn test_into_http_sets_zero_content_length_for_reads() {
        let coord = RecordCoordinate::record("ks1", "cf1", "k1");
        let req = encode_read(Operation::Fetch, &coord)
            .into_http("http://localhost:8001")
            .unwrap();
        assert_eq!(req.method(), Method::GET);
        assert_eq!(req.uri().path(), "/ks1/cf1/k1/");
        assert_eq!(
            req.headers().get(header::CONTENT_LENGTH).unwrap(),
            &http::HeaderValue::from(0usize)
        );
        assert!(req.headers().get(header::CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_into_http_sets_exact_content_length_for_writes() {
        let coord = RecordCoordinate::collection("ks1", "cf1");
        let wire = encode_write(Operation::Update, &coord, &json!({"x": 1})).unwrap();
        let body_len = wire.body.len();
        let req = wire.into_http("http://localhost:8001").unwrap();
        assert_eq!(req.method(), Method::PUT);
        assert_eq!(
            req.headers().get(header::CONTENT_LENGTH).unwrap(),
            &http::HeaderValue::from(body_len)
        );
        assert_eq!(
            req.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/x-www-form-urlencoded"
        );
    }
}
