//! MongoDB backend implementation for docshelf.
//!
//! This crate binds the `CollectionBackend` trait to a single MongoDB
//! collection using the official async driver.
//!
//! To use this backend, include the `mongodb` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! docshelf = { version = "x.y.z", features = ["mongodb"] }
//! ```
//!
//! # Connection
//!
//! Credentials and the target database/collection are supplied through
//! [`ConnectOptions`]; construction builds the connection URI with a
//! percent-encoded password, applies a 5-second server selection timeout
//! unless overridden, and validates connectivity and credentials with an
//! eager `ping`.
//!
//! # Example
//!
//! ```ignore
//! use docshelf_core::client::CollectionClient;
//! use docshelf_mongodb::{ConnectOptions, MongoCollectionBackend};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = ConnectOptions::new("aacuser", "secret", "localhost", 27017, "aac", "animals");
//!     let backend = MongoCollectionBackend::connect(options).await?;
//!     let client = CollectionClient::new(backend);
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docshelf_mongodb;

pub mod config;
pub mod store;

pub use config::{ConnectOptions, DEFAULT_SERVER_SELECTION_TIMEOUT};
pub use store::{MongoCollectionBackend, MongoCollectionBackendBuilder};
