//! An async HTTP client for a remote JSON record store
//!
//! The remote store groups records into keyspaces and column families; a
//! record is addressed by a [`RecordCoordinate`] and holds an arbitrary
//! JSON value. This library exposes four non-blocking operations (fetch,
//! delete, create, and update) and normalizes the remote's HTTP responses
//! into a single [`OperationResult`] per call.
//!
//! # Features
//! - Async/await API using tokio, one HTTP request per operation
//! - Percent-encoded wire paths, deterministic request encoding
//! - Uniform result classification (success payload / not found / remote error)
//! - Typed payload decoding via serde
//! - Built-in timeout support
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use record_store_client::{Client, RecordCoordinate};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), record_store_client::Error> {
//!     let client = Client::new("localhost", 8001)?;
//!
//!     // Create a record
//!     let coord = RecordCoordinate::record("users", "profiles", "alice");
//!     client.create(&coord, &serde_json::json!({"name": "Alice"})).await?;
//!
//!     // Fetch it back
//!     let result = client.fetch(&coord).await?;
//!     println!("Fetched: {:?}", result);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2018_idioms)]

pub mod client;
pub mod error;
pub mod types;

mod response;
mod wire;

pub use client::{Client, ClientConfig};
pub use error::{Error, Result};
pub use types::{OperationResult, RecordCoordinate};
