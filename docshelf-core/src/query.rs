//! Read query construction for collection clients.
//!
//! A [`ReadQuery`] bundles the filter, projection, sort keys, and pagination
//! parameters of a single read. Backends apply sort before skip before limit,
//! so paging over a sorted result set is deterministic.
//!
//! Queries are built with the fluent builder API:
//!
//! ```ignore
//! use docshelf::query::{ReadQuery, SortDirection};
//! use bson::doc;
//!
//! let query = ReadQuery::builder()
//!     .filter(doc! { "animal_type": "Dog" })
//!     .projection(doc! { "_id": 0, "name": 1 })
//!     .sort("age", SortDirection::Asc)
//!     .skip(2)
//!     .limit(3)
//!     .build();
//! ```

use bson::Document;

/// Sort direction for query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order (A to Z, 0 to 9, earliest to latest).
    Asc,
    /// Descending order (Z to A, 9 to 0, latest to earliest).
    Desc,
}

impl SortDirection {
    /// The numeric order marker used in wire-level sort documents.
    pub fn order(self) -> i32 {
        match self {
            SortDirection::Asc => 1,
            SortDirection::Desc => -1,
        }
    }
}

/// A single sort key: which field to sort by and in which direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    /// The field name to sort by.
    pub field: String,
    /// The sort direction.
    pub direction: SortDirection,
}

/// A structured read query for retrieving documents from a collection.
///
/// The default query matches all documents, returns every field, applies no
/// sort, skips nothing, and is unbounded (`limit` of 0 means no limit).
#[derive(Debug, Clone, Default)]
pub struct ReadQuery {
    /// Optional match criteria; `None` matches every document.
    pub filter: Option<Document>,
    /// Optional field projection; `None` returns all fields.
    pub projection: Option<Document>,
    /// Ordered sort keys, applied before pagination.
    pub sort: Vec<SortKey>,
    /// Number of documents to skip after sorting.
    pub skip: u64,
    /// Maximum number of documents to return; 0 means unbounded.
    pub limit: u64,
}

impl ReadQuery {
    /// Creates a match-all query with no projection, sort, or pagination.
    pub fn new() -> Self {
        ReadQuery::default()
    }

    /// Creates a new query builder for fluent construction.
    pub fn builder() -> ReadQueryBuilder {
        ReadQueryBuilder::new()
    }
}

/// Fluent builder for [`ReadQuery`].
#[derive(Debug, Clone, Default)]
pub struct ReadQueryBuilder {
    query: ReadQuery,
}

impl ReadQueryBuilder {
    /// Creates a new query builder.
    pub fn new() -> Self {
        ReadQueryBuilder { query: ReadQuery::default() }
    }

    /// Sets the match criteria for this query.
    pub fn filter(mut self, filter: Document) -> Self {
        self.query.filter = Some(filter);
        self
    }

    /// Sets the field projection for this query.
    pub fn projection(mut self, projection: Document) -> Self {
        self.query.projection = Some(projection);
        self
    }

    /// Appends a sort key. Keys are applied in the order they were added.
    pub fn sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.query.sort.push(SortKey { field: field.into(), direction });
        self
    }

    /// Sets the number of documents to skip after sorting.
    pub fn skip(mut self, skip: u64) -> Self {
        self.query.skip = skip;
        self
    }

    /// Sets the maximum number of documents to return (0 = unbounded).
    pub fn limit(mut self, limit: u64) -> Self {
        self.query.limit = limit;
        self
    }

    /// Builds and returns the final query.
    pub fn build(self) -> ReadQuery {
        self.query
    }
}
