//! Storage backend abstraction for collection clients.
//!
//! A [`CollectionBackend`] is bound to exactly one collection of one store
//! and exposes the narrow call surface the client layer needs: a liveness
//! probe, single-document insert, cursor-materializing find, single/multi
//! update and delete, and teardown.
//!
//! Backends report failures as [`StoreClientResult`] errors; translating
//! those into the public defaults (`false`, empty vec, 0) is the client's
//! job, never the backend's.

use async_trait::async_trait;
use bson::Document;
use std::fmt::Debug;

use crate::{error::StoreClientResult, query::ReadQuery};

/// Abstract interface over a single document collection.
///
/// Implementations must be thread-safe (`Send + Sync`); the exact concurrency
/// model is delegated to the underlying store and should be documented by the
/// implementer.
#[async_trait]
pub trait CollectionBackend: Send + Sync + Debug {
    /// Issues a lightweight liveness command against the store.
    ///
    /// Used at construction time to validate reachability and credentials
    /// eagerly rather than on first use.
    async fn ping(&self) -> StoreClientResult<()>;

    /// Inserts exactly one document.
    ///
    /// Returns `true` when the store acknowledged the write.
    async fn insert_one(&self, document: Document) -> StoreClientResult<bool>;

    /// Executes a read query and materializes the full result set.
    ///
    /// Sort is applied before skip, and skip before limit, so sorted paging
    /// is deterministic. There is no streaming contract at this layer.
    async fn find(&self, query: ReadQuery) -> StoreClientResult<Vec<Document>>;

    /// Applies an operator update document to one (`many == false`) or all
    /// matching documents.
    ///
    /// Returns the number of documents actually modified, not merely matched.
    async fn update(
        &self,
        filter: Document,
        update: Document,
        many: bool,
    ) -> StoreClientResult<u64>;

    /// Deletes one (`many == false`) or all matching documents.
    ///
    /// Returns the number of documents removed.
    async fn delete(&self, filter: Document, many: bool) -> StoreClientResult<u64>;

    /// Cleanly shuts down the backend, releasing its connection.
    ///
    /// The default implementation is a no-op; backends holding external
    /// connections should override this.
    async fn shutdown(self) -> StoreClientResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

/// Factory trait for constructing backend instances asynchronously.
#[async_trait]
pub trait CollectionBackendBuilder {
    type Backend: CollectionBackend;

    async fn build(self) -> StoreClientResult<Self::Backend>;
}
