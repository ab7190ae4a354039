//! The public collection client and its error-translation policies.
//!
//! [`CollectionClient`] wraps a [`CollectionBackend`] and enforces the
//! contract surface of this layer:
//!
//! - `create` and `read` never fail: store-level errors are logged and
//!   collapsed into `false` / an empty vec. A caller therefore cannot
//!   distinguish "no matching documents" from "the read silently failed";
//!   that ambiguity is part of the contract, not an accident.
//! - `update` and `delete` keep a `Result` surface so structurally invalid
//!   input (an empty update document) is surfaced to the caller, while
//!   store-level errors still collapse into `Ok(0)`.
//! - `close` is idempotent and never fails; teardown errors are swallowed.
//!
//! Internally every operation is a [`StoreClientResult`], so the collapsed
//! errors remain visible to logging even though the public API erases them.

use bson::Document;
use tracing::{debug, warn};

use crate::{
    backend::CollectionBackend,
    error::{StoreClientError, StoreClientResult},
    query::ReadQuery,
    update::UpdateSpec,
};

/// A validated CRUD client for a single document collection.
///
/// The client owns its backend. Operations block the calling task until the
/// store responds or times out; none are cancellable once issued. Sharing a
/// client across tasks is not part of this layer's contract; driver
/// thread-safety is an external concern.
#[derive(Debug)]
pub struct CollectionClient<B: CollectionBackend> {
    backend: Option<B>,
}

impl<B: CollectionBackend> CollectionClient<B> {
    /// Wraps an already-constructed backend.
    pub fn new(backend: B) -> Self {
        Self { backend: Some(backend) }
    }

    fn backend(&self) -> StoreClientResult<&B> {
        self.backend
            .as_ref()
            .ok_or_else(|| StoreClientError::Operation("client is closed".into()))
    }

    /// Inserts a single document.
    ///
    /// Returns `true` only when the store acknowledged the insert. Empty
    /// documents are rejected with `false` before reaching the store, and
    /// store-level failures are logged and reported as `false`. This
    /// operation never fails.
    pub async fn create(&self, document: Document) -> bool {
        if document.is_empty() {
            return false;
        }

        match self.try_create(document).await {
            Ok(acknowledged) => acknowledged,
            Err(err) => {
                warn!(error = %err, "insert failed");
                false
            }
        }
    }

    async fn try_create(&self, document: Document) -> StoreClientResult<bool> {
        self.backend()?.insert_one(document).await
    }

    /// Retrieves the documents matching a query as an ordered sequence.
    ///
    /// Returns an empty vec both for zero matches and for store-level
    /// failures (which are logged); this operation never fails.
    pub async fn read(&self, query: ReadQuery) -> Vec<Document> {
        match self.try_read(query).await {
            Ok(documents) => documents,
            Err(err) => {
                warn!(error = %err, "read failed");
                Vec::new()
            }
        }
    }

    async fn try_read(&self, query: ReadQuery) -> StoreClientResult<Vec<Document>> {
        self.backend()?.find(query).await
    }

    /// Updates one (`many == false`) or all documents matching the filter.
    ///
    /// A plain field document is transparently wrapped into `$set`; see
    /// [`UpdateSpec`] for the classification rule. Returns the number of
    /// documents actually modified.
    ///
    /// # Errors
    ///
    /// Returns [`StoreClientError::InvalidArgument`] if the update document
    /// is empty; nothing is modified in that case. Store-level failures are
    /// logged and reported as `Ok(0)`.
    pub async fn update(
        &self,
        filter: Document,
        update: Document,
        many: bool,
    ) -> StoreClientResult<u64> {
        let update = UpdateSpec::classify(update)?.into_document();

        match self.try_update(filter, update, many).await {
            Ok(modified) => Ok(modified),
            Err(err) => {
                warn!(error = %err, "update failed");
                Ok(0)
            }
        }
    }

    async fn try_update(
        &self,
        filter: Document,
        update: Document,
        many: bool,
    ) -> StoreClientResult<u64> {
        self.backend()?.update(filter, update, many).await
    }

    /// Deletes one (`many == false`) or all documents matching the filter.
    ///
    /// Returns the number of documents removed. Store-level failures are
    /// logged and reported as `Ok(0)`.
    pub async fn delete(&self, filter: Document, many: bool) -> StoreClientResult<u64> {
        match self.try_delete(filter, many).await {
            Ok(deleted) => Ok(deleted),
            Err(err) => {
                warn!(error = %err, "delete failed");
                Ok(0)
            }
        }
    }

    async fn try_delete(&self, filter: Document, many: bool) -> StoreClientResult<u64> {
        self.backend()?.delete(filter, many).await
    }

    /// Releases the underlying connection.
    ///
    /// Idempotent: closing an already-closed client is a no-op. Teardown
    /// failures are swallowed. Operations issued after close take the
    /// operation-error path and report their default values.
    pub async fn close(&mut self) {
        if let Some(backend) = self.backend.take() {
            if let Err(err) = backend.shutdown().await {
                debug!(error = %err, "backend teardown failed");
            }
        }
    }

    /// Whether the client still holds its backend.
    pub fn is_open(&self) -> bool {
        self.backend.is_some()
    }
}
