//! Convenient re-exports of commonly used types from docshelf.
//!
//! Import this prelude module to quickly access the most frequently used types
//! and traits without needing to import from multiple sub-modules:
//!
//! ```ignore
//! use docshelf::prelude::*;
//! ```
//!
//! This provides access to:
//! - The collection client and its backend traits
//! - Query construction and sorting
//! - Update classification
//! - Typed document conversion helpers
//! - Error types

pub use docshelf_core::{
    backend::{CollectionBackend, CollectionBackendBuilder},
    client::CollectionClient,
    document::{from_document, to_document},
    error::{StoreClientError, StoreClientResult},
    query::{ReadQuery, ReadQueryBuilder, SortDirection, SortKey},
    update::UpdateSpec,
};
