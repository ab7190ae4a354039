//! In-memory collection backend.
//!
//! Stores documents as BSON in a `Vec` behind an async-aware read-write
//! lock. Queries scan the whole collection; this is meant for development
//! and tests, not large datasets.

use std::{cmp::Ordering, sync::Arc};

use async_trait::async_trait;
use bson::{Bson, Document, oid::ObjectId};
use mea::rwlock::RwLock;

use docshelf_core::{
    backend::{CollectionBackend, CollectionBackendBuilder},
    error::StoreClientResult,
    query::{ReadQuery, SortDirection, SortKey},
};

use crate::{matcher, mutate};

/// Thread-safe in-memory backend for a single collection.
///
/// Cloneable; clones share the same underlying data through an `Arc`.
///
/// # Example
///
/// ```ignore
/// use docshelf_memory::InMemoryCollection;
/// use docshelf_core::{backend::CollectionBackend, query::ReadQuery};
/// use bson::doc;
///
/// let backend = InMemoryCollection::new();
/// backend.insert_one(doc! { "name": "Bella" }).await?;
/// let all = backend.find(ReadQuery::new()).await?;
/// assert_eq!(all.len(), 1);
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryCollection {
    documents: Arc<RwLock<Vec<Document>>>,
}

impl InMemoryCollection {
    /// Creates a new empty in-memory collection.
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Creates a builder for constructing an `InMemoryCollection`.
    pub fn builder() -> InMemoryCollectionBuilder {
        InMemoryCollectionBuilder::default()
    }

    /// Number of documents currently stored.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Whether the collection holds no documents.
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl CollectionBackend for InMemoryCollection {
    async fn ping(&self) -> StoreClientResult<()> {
        Ok(())
    }

    async fn insert_one(&self, mut document: Document) -> StoreClientResult<bool> {
        if !document.contains_key("_id") {
            document.insert("_id", ObjectId::new());
        }

        self.documents.write().await.push(document);

        Ok(true)
    }

    async fn find(&self, query: ReadQuery) -> StoreClientResult<Vec<Document>> {
        let documents = self.documents.read().await;
        let filter = query.filter.unwrap_or_default();

        let mut results = Vec::new();
        for document in documents.iter() {
            if matcher::matches(document, &filter)? {
                results.push(document.clone());
            }
        }
        drop(documents);

        // Fixed pipeline order: sort, then skip, then limit.
        if !query.sort.is_empty() {
            results.sort_by(|a, b| compare_by_keys(a, b, &query.sort));
        }

        let limit = if query.limit == 0 {
            usize::MAX
        } else {
            query.limit as usize
        };
        let page = results
            .into_iter()
            .skip(query.skip as usize)
            .take(limit);

        Ok(match &query.projection {
            Some(projection) if !projection.is_empty() => {
                page.map(|document| project(&document, projection)).collect()
            }
            _ => page.collect(),
        })
    }

    async fn update(
        &self,
        filter: Document,
        update: Document,
        many: bool,
    ) -> StoreClientResult<u64> {
        let mut documents = self.documents.write().await;
        let mut modified = 0;

        for document in documents.iter_mut() {
            if !matcher::matches(document, &filter)? {
                continue;
            }

            if mutate::apply_update(document, &update)? {
                modified += 1;
            }

            if !many {
                break;
            }
        }

        Ok(modified)
    }

    async fn delete(&self, filter: Document, many: bool) -> StoreClientResult<u64> {
        let mut documents = self.documents.write().await;
        let mut deleted = 0;
        let mut index = 0;

        while index < documents.len() {
            if matcher::matches(&documents[index], &filter)? {
                documents.remove(index);
                deleted += 1;

                if !many {
                    break;
                }
            } else {
                index += 1;
            }
        }

        Ok(deleted)
    }
}

fn compare_by_keys(a: &Document, b: &Document, keys: &[SortKey]) -> Ordering {
    for key in keys {
        let left = a
            .get(&key.field)
            .map(matcher::Comparable::from)
            .unwrap_or(matcher::Comparable::Null);
        let right = b
            .get(&key.field)
            .map(matcher::Comparable::from)
            .unwrap_or(matcher::Comparable::Null);

        let ordering = match key.direction {
            SortDirection::Asc => left.partial_cmp(&right),
            SortDirection::Desc => right.partial_cmp(&left),
        }
        .unwrap_or(Ordering::Equal);

        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    Ordering::Equal
}

/// Applies Mongo-style include/exclude projection semantics.
///
/// Inclusion mode keeps the listed fields plus `_id` (unless `_id` is
/// explicitly excluded); exclusion mode drops the listed fields.
fn project(document: &Document, projection: &Document) -> Document {
    let inclusion = projection
        .iter()
        .any(|(key, value)| key != "_id" && selected(value));

    if inclusion {
        let mut out = Document::new();

        if let Some(id) = document.get("_id") {
            let keep_id = projection.get("_id").map(selected).unwrap_or(true);
            if keep_id {
                out.insert("_id", id.clone());
            }
        }

        for (key, value) in projection {
            if key == "_id" || !selected(value) {
                continue;
            }
            if let Some(found) = document.get(key) {
                out.insert(key.clone(), found.clone());
            }
        }

        out
    } else {
        let mut out = document.clone();
        for (key, value) in projection {
            if !selected(value) {
                out.remove(key);
            }
        }
        out
    }
}

fn selected(value: &Bson) -> bool {
    match value {
        Bson::Int32(v) => *v != 0,
        Bson::Int64(v) => *v != 0,
        Bson::Double(v) => *v != 0.0,
        Bson::Boolean(v) => *v,
        _ => true,
    }
}

/// Builder for constructing [`InMemoryCollection`] instances.
#[derive(Default)]
pub struct InMemoryCollectionBuilder;

#[async_trait]
impl CollectionBackendBuilder for InMemoryCollectionBuilder {
    type Backend = InMemoryCollection;

    /// Builds and returns a new [`InMemoryCollection`]. Always succeeds.
    async fn build(self) -> StoreClientResult<Self::Backend> {
        Ok(InMemoryCollection::new())
    }
}
