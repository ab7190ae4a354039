//! Main docshelf crate providing a validated CRUD layer over a single
//! document collection.
//!
//! This crate is the primary entry point for users of the docshelf framework.
//! It re-exports the core types from the sub-crates and provides convenient
//! access to the available storage backends.
//!
//! # Features
//!
//! - **Validated CRUD** - A thin client that checks arguments before any
//!   backend round trip and degrades gracefully on operation failures
//! - **Multiple backends** - In-memory storage for tests and development,
//!   MongoDB for production, behind a single trait
//! - **Composable reads** - Filter, projection, sort, skip, and limit built
//!   through a small query builder
//!
//! # Quick Start
//!
//! ```ignore
//! use docshelf::prelude::*;
//! use docshelf::memory::InMemoryCollection;
//! use bson::doc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = InMemoryCollection::builder().build().await.unwrap();
//!     let mut client = CollectionClient::new(backend);
//!
//!     // Insert a document. Returns false instead of failing when the
//!     // backend rejects it.
//!     let inserted = client
//!         .create(doc! { "name": "Luna", "animal_type": "Dog", "age": 3 })
//!         .await;
//!     assert!(inserted);
//!
//!     // Query it back.
//!     let found = client
//!         .read(
//!             ReadQuery::builder()
//!                 .filter(doc! { "animal_type": "Dog" })
//!                 .sort("age", SortDirection::Asc)
//!                 .build(),
//!         )
//!         .await;
//!     assert_eq!(found.len(), 1);
//!
//!     // Plain field updates are wrapped in $set automatically.
//!     let modified = client
//!         .update(doc! { "name": "Luna" }, doc! { "age": 4 }, false)
//!         .await
//!         .unwrap();
//!     assert_eq!(modified, 1);
//!
//!     client.close().await;
//! }
//! ```
//!
//! # Backends
//!
//! - [`memory`] - Fast in-memory storage for development and testing
//! - [`mongodb`] - Persistent MongoDB backend (requires `mongodb` feature)

pub mod prelude;

pub use docshelf_core::{backend, client, document, error, query, update};

// Re-export BSON types for convenience
pub use bson;

/// In-memory storage backend implementations.
pub mod memory {
    pub use docshelf_memory::{InMemoryCollection, InMemoryCollectionBuilder};
}

/// MongoDB storage backend implementations.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use docshelf_mongodb::{ConnectOptions, MongoCollectionBackend, MongoCollectionBackendBuilder};
}
