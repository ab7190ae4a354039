//! Core of the docshelf project: a validated CRUD layer over a single
//! document collection.
//!
//! This crate provides:
//!
//! - **Collection client** ([`client`]) - The public CRUD surface with its
//!   validation, normalization, and error-translation rules
//! - **Backend abstraction** ([`backend`]) - The trait seam concrete stores
//!   implement
//! - **Read queries** ([`query`]) - Filter, projection, sort, and pagination
//!   in one builder-constructed value
//! - **Update classification** ([`update`]) - The `$set` wrapping rule for
//!   plain field documents
//! - **Document helpers** ([`document`]) - Typed-value conversions with no
//!   schema enforcement
//! - **Error handling** ([`error`]) - Error and result types
//!
//! # Example
//!
//! ```ignore
//! use docshelf_core::{client::CollectionClient, query::ReadQuery};
//! use bson::doc;
//!
//! let client = CollectionClient::new(backend);
//!
//! client.create(doc! { "name": "Bella", "animal_type": "Dog" }).await;
//! let dogs = client
//!     .read(ReadQuery::builder().filter(doc! { "animal_type": "Dog" }).build())
//!     .await;
//! ```

#[allow(unused_extern_crates)]
extern crate self as docshelf_core;

pub mod backend;
pub mod client;
pub mod document;
pub mod error;
pub mod query;
pub mod update;
