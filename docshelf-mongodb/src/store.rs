//! MongoDB collection backend.
//!
//! Delegates every operation to the official `mongodb` driver: `insertOne`,
//! `find` with sort/skip/limit/projection options, `updateOne`/`updateMany`,
//! `deleteOne`/`deleteMany`, and the `ping` admin command used as the
//! liveness probe.

use async_trait::async_trait;
use bson::{Bson, Document, doc};
use futures::TryStreamExt;
use mongodb::{
    Client, Collection as MongoCollection,
    options::{ClientOptions, FindOptions},
};
use tracing::debug;

use docshelf_core::{
    backend::{CollectionBackend, CollectionBackendBuilder},
    error::{StoreClientError, StoreClientResult},
    query::{ReadQuery, SortKey},
};

use crate::config::ConnectOptions;

/// A backend bound to one MongoDB collection.
#[derive(Debug)]
pub struct MongoCollectionBackend {
    client: Client,
    collection: MongoCollection<Document>,
}

impl MongoCollectionBackend {
    /// Connects to the server and eagerly validates reachability and
    /// credentials with a `ping` against the `admin` database, so a bad
    /// password or unreachable host fails here rather than on first use.
    ///
    /// # Errors
    ///
    /// Any driver failure during URI parsing, client construction, or the
    /// liveness probe is re-raised as [`StoreClientError::Connection`]
    /// carrying the underlying cause.
    pub async fn connect(options: ConnectOptions) -> StoreClientResult<Self> {
        let mut client_options = ClientOptions::parse(options.uri())
            .await
            .map_err(|err| StoreClientError::connection("invalid connection URI", err))?;

        client_options.server_selection_timeout = Some(options.server_selection_timeout);
        if let Some(timeout) = options.connect_timeout {
            client_options.connect_timeout = Some(timeout);
        }
        if let Some(size) = options.min_pool_size {
            client_options.min_pool_size = Some(size);
        }
        if let Some(size) = options.max_pool_size {
            client_options.max_pool_size = Some(size);
        }
        if let Some(name) = options.app_name.clone() {
            client_options.app_name = Some(name);
        }

        let client = Client::with_options(client_options)
            .map_err(|err| StoreClientError::connection("client construction failed", err))?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|err| {
                StoreClientError::connection("server unreachable or authentication failed", err)
            })?;

        debug!(
            host = %options.host,
            database = %options.database,
            collection = %options.collection,
            "connected"
        );

        let collection = client
            .database(&options.database)
            .collection(&options.collection);

        Ok(Self { client, collection })
    }

    /// Creates a builder that connects with the given options.
    pub fn builder(options: ConnectOptions) -> MongoCollectionBackendBuilder {
        MongoCollectionBackendBuilder { options }
    }
}

fn operation_error(err: mongodb::error::Error) -> StoreClientError {
    StoreClientError::Operation(err.to_string())
}

/// Builds the wire-level sort document from ordered sort keys.
pub(crate) fn sort_document(keys: &[SortKey]) -> Document {
    keys.iter()
        .map(|key| (key.field.clone(), Bson::Int32(key.direction.order())))
        .collect()
}

#[async_trait]
impl CollectionBackend for MongoCollectionBackend {
    async fn ping(&self) -> StoreClientResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(operation_error)?;

        Ok(())
    }

    async fn insert_one(&self, document: Document) -> StoreClientResult<bool> {
        self.collection
            .insert_one(document)
            .await
            .map_err(operation_error)?;

        // The driver only returns Ok for acknowledged writes.
        Ok(true)
    }

    async fn find(&self, query: ReadQuery) -> StoreClientResult<Vec<Document>> {
        let mut options = FindOptions::default();

        if !query.sort.is_empty() {
            options.sort = Some(sort_document(&query.sort));
        }
        if query.skip > 0 {
            options.skip = Some(query.skip);
        }
        if query.limit > 0 {
            options.limit = Some(query.limit as i64);
        }
        if let Some(projection) = query.projection {
            options.projection = Some(projection);
        }

        Ok(self
            .collection
            .find(query.filter.unwrap_or_default())
            .with_options(options)
            .await
            .map_err(operation_error)?
            .try_collect::<Vec<Document>>()
            .await
            .map_err(operation_error)?)
    }

    async fn update(
        &self,
        filter: Document,
        update: Document,
        many: bool,
    ) -> StoreClientResult<u64> {
        let result = if many {
            self.collection.update_many(filter, update).await
        } else {
            self.collection.update_one(filter, update).await
        };

        Ok(result.map_err(operation_error)?.modified_count)
    }

    async fn delete(&self, filter: Document, many: bool) -> StoreClientResult<u64> {
        let result = if many {
            self.collection.delete_many(filter).await
        } else {
            self.collection.delete_one(filter).await
        };

        Ok(result.map_err(operation_error)?.deleted_count)
    }

    async fn shutdown(self) -> StoreClientResult<()> {
        self.client.shutdown().await;

        Ok(())
    }
}

/// Builder that connects a [`MongoCollectionBackend`] from [`ConnectOptions`].
pub struct MongoCollectionBackendBuilder {
    options: ConnectOptions,
}

#[async_trait]
impl CollectionBackendBuilder for MongoCollectionBackendBuilder {
    type Backend = MongoCollectionBackend;

    async fn build(self) -> StoreClientResult<Self::Backend> {
        MongoCollectionBackend::connect(self.options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docshelf_core::query::SortDirection;

    #[test]
    fn sort_document_preserves_key_order_and_directions() {
        let keys = vec![
            SortKey { field: "age".into(), direction: SortDirection::Asc },
            SortKey { field: "name".into(), direction: SortDirection::Desc },
        ];

        assert_eq!(sort_document(&keys), doc! { "age": 1, "name": -1 });
    }
}
