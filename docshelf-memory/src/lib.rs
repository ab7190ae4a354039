//! In-memory collection backend for docshelf.
//!
//! This crate provides a thread-safe, in-memory implementation of the
//! `CollectionBackend` trait. It understands a practical subset of the
//! Mongo query and update languages (equality and comparison operators,
//! `$and`/`$or`, `$set`/`$unset`/`$inc`) and applies the same
//! sort/skip/limit/projection pipeline a real store would, which makes it
//! suitable for development and for exercising client behavior in tests
//! without a running server.
//!
//! # Quick Start
//!
//! ```ignore
//! use docshelf_core::{client::CollectionClient, query::ReadQuery};
//! use docshelf_memory::InMemoryCollection;
//! use bson::doc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = CollectionClient::new(InMemoryCollection::new());
//!
//!     client.create(doc! { "name": "Bella", "animal_type": "Dog" }).await;
//!     let dogs = client
//!         .read(ReadQuery::builder().filter(doc! { "animal_type": "Dog" }).build())
//!         .await;
//!     assert_eq!(dogs.len(), 1);
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docshelf_memory;

pub mod matcher;
pub mod mutate;
pub mod store;

pub use store::{InMemoryCollection, InMemoryCollectionBuilder};
