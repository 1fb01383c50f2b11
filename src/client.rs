//! HTTP client for the remote record store

use std::sync::Arc;
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::{StatusCode, Uri};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client as HttpClient;
use hyper_util::rt::TokioExecutor;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::response::classify;
use crate::types::{OperationResult, RecordCoordinate};
use crate::wire::{self, Operation, WireRequest};

/// Configuration options for the record store client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Remote host (default: localhost)
    pub host: String,
    /// Remote port (default: 8001)
    pub port: u16,
    /// Request timeout in milliseconds (default: 30000)
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8001,
            timeout_ms: 30000,
        }
    }
}

/// Async client for the remote record store
///
/// Records live in a keyspace / column family / key hierarchy and hold
/// arbitrary JSON values. Each operation issues exactly one HTTP request
/// and resolves to exactly one [`OperationResult`]: no retries, no
/// deduplication of concurrent calls. Concurrent calls are independent
/// and unordered with respect to each other, even on the same coordinate.
///
/// Cloning is cheap; clones share the configuration and the transport's
/// connection pool. The client never assumes exclusive ownership of any
/// connection.
///
/// # Example
/// ```rust,no_run
/// use record_store_client::{Client, RecordCoordinate};
///
/// #[tokio::main]
/// async fn main() -> Result<(), record_store_client::Error> {
///     let client = Client::new("localhost", 8001)?;
///
///     let coord = RecordCoordinate::record("users", "profiles", "alice");
///     let result = client.fetch(&coord).await?;
///     if result.is_not_found() {
///         println!("no such record");
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    config: Arc<ClientConfig>,
    base: String,
    http_client: HttpClient<HttpConnector, Full<Bytes>>,
}

impl Client {
    /// Create a client for `http://{host}:{port}`
    ///
    /// # Errors
    /// Returns an error if the host/port pair does not form a valid URL
    pub fn new(host: &str, port: u16) -> Result<Self> {
        let config = ClientConfig {
            host: host.to_string(),
            port,
            ..Default::default()
        };
        Self::with_config(config)
    }

    /// Create a client with custom configuration
    ///
    /// `ClientConfig::default()` points at `localhost:8001`:
    ///
    /// ```rust
    /// use record_store_client::{Client, ClientConfig};
    /// let client = Client::with_config(ClientConfig::default()).unwrap();
    /// assert_eq!(client.port(), 8001);
    /// ```
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let base = format!("http://{}:{}", config.host, config.port);

        // Validate the endpoint early
        let _: Uri = format!("{}/", base)
            .parse()
            .map_err(|e| Error::InvalidUrl(format!("Invalid endpoint URL: {}", e)))?;

        let http_client = HttpClient::builder(TokioExecutor::new()).build(HttpConnector::new());

        Ok(Self {
            config: Arc::new(config),
            base,
            http_client,
        })
    }

    /// Remote host this client talks to
    pub fn host(&self) -> &str {
        &self.config.host
    }

    /// Remote port this client talks to
    pub fn port(&self) -> u16 {
        self.config.port
    }

    /// Fetch a record, or a whole column family when the coordinate has
    /// no key
    ///
    /// # Example
    /// ```rust,no_run
    /// # use record_store_client::{Client, OperationResult, RecordCoordinate};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), record_store_client::Error> {
    /// # let client = Client::new("localhost", 8001)?;
    /// let coord = RecordCoordinate::record("users", "profiles", "alice");
    /// match client.fetch(&coord).await? {
    ///     OperationResult::Success(payload) => println!("{}", payload),
    ///     OperationResult::NotFound => println!("no such record"),
    ///     OperationResult::RemoteError { status, message } => {
    ///         eprintln!("remote failed ({}): {}", status, message)
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn fetch(&self, coord: &RecordCoordinate) -> Result<OperationResult> {
        let (status, body) = self
            .dispatch(wire::encode_read(Operation::Fetch, coord))
            .await?;
        classify(status, &body)
    }

    /// Delete a record, or a whole column family when the coordinate has
    /// no key
    ///
    /// Applies the same classification as [`Client::fetch`]: deleting an
    /// absent record resolves to [`OperationResult::NotFound`], not an
    /// error.
    pub async fn delete(&self, coord: &RecordCoordinate) -> Result<OperationResult> {
        let (status, body) = self
            .dispatch(wire::encode_read(Operation::Delete, coord))
            .await?;
        classify(status, &body)
    }

    /// Create a record with the given value
    ///
    /// The value may be any serializable type; it is shipped to the
    /// remote as JSON. On success the payload echoes the record as saved.
    ///
    /// # Example
    /// ```rust,no_run
    /// # use record_store_client::{Client, RecordCoordinate};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), record_store_client::Error> {
    /// # let client = Client::new("localhost", 8001)?;
    /// let coord = RecordCoordinate::record("users", "profiles", "alice");
    /// let result = client.create(&coord, &serde_json::json!({"name": "Alice"})).await?;
    /// assert!(result.is_success());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create<T>(&self, coord: &RecordCoordinate, value: &T) -> Result<OperationResult>
    where
        T: Serialize + ?Sized,
    {
        let (status, body) = self
            .dispatch(wire::encode_write(Operation::Create, coord, value)?)
            .await?;
        classify(status, &body)
    }

    /// Replace a record with the given value
    ///
    /// Idempotent replace semantics are expected from the remote; the
    /// client does not enforce them.
    pub async fn update<T>(&self, coord: &RecordCoordinate, value: &T) -> Result<OperationResult>
    where
        T: Serialize + ?Sized,
    {
        let (status, body) = self
            .dispatch(wire::encode_write(Operation::Update, coord, value)?)
            .await?;
        classify(status, &body)
    }

    /// Fetch a record and decode its payload into `T`
    ///
    /// Returns `None` when the record does not exist. A remote error
    /// status surfaces as [`Error::Remote`].
    ///
    /// # Example
    /// ```rust,no_run
    /// # use record_store_client::{Client, RecordCoordinate};
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Profile {
    ///     name: String,
    /// }
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), record_store_client::Error> {
    /// # let client = Client::new("localhost", 8001)?;
    /// let coord = RecordCoordinate::record("users", "profiles", "alice");
    /// if let Some(profile) = client.fetch_as::<Profile>(&coord).await? {
    ///     println!("name: {}", profile.name);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn fetch_as<T>(&self, coord: &RecordCoordinate) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self.fetch(coord).await? {
            OperationResult::Success(value) => Ok(Some(serde_json::from_value(value)?)),
            OperationResult::NotFound => Ok(None),
            OperationResult::RemoteError { status, message } => {
                Err(Error::Remote { status, message })
            }
        }
    }

    /// Issue one wire request and buffer the complete response
    ///
    /// Exactly one transport request per call. Connect-level failures map
    /// to [`Error::Transport`]; a request that outlives the configured
    /// timeout resolves to [`Error::Timeout`] instead of hanging.
    async fn dispatch(&self, request: WireRequest) -> Result<(StatusCode, Bytes)> {
        debug!("Sending request: {} {}", request.method, request.path);

        let req = request.into_http(&self.base)?;

        let timeout = Duration::from_millis(self.config.timeout_ms);
        let response = tokio::time::timeout(timeout, self.http_client.request(req))
            .await
            .map_err(|_| Error::Timeout(self.config.timeout_ms))?
            .map_err(|e| Error::Transport(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = Self::collect_body(response.into_body()).await?;
        Ok((status, body))
    }

    /// Accumulate the streamed response body, frame by frame
    ///
    /// Classification only ever runs on a completed body; the buffer is
    /// handed back once the stream finishes.
    async fn collect_body(mut body: Incoming) -> Result<Bytes> {
        let mut buf = BytesMut::new();
        while let Some(frame) = body.frame().await {
            let frame = frame.map_err(|e| Error::Transport(format!("Body stream failed: {}", e)))?;
            if let Some(chunk) = frame.data_ref() {
                buf.extend_from_slice(chunk);
            }
        }
        Ok(buf.freeze())
    }
}
