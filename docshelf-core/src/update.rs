//! Update specification classification and normalization.
//!
//! Callers may describe an update either as an operator document
//! (`{"$set": {"name": "Luna"}}`, `{"$inc": {"visits": 1}}`) or as a plain
//! field document (`{"name": "Luna"}`). Plain field documents are
//! transparently wrapped into a single `$set` before reaching the backend.
//!
//! The decision is made by inspecting top-level keys only: if *any* top-level
//! key carries the `$` operator prefix, the whole document is passed through
//! unmodified. Mixed documents are never split into a wrapped part and a
//! pass-through part.

use bson::{Document, doc};

use crate::error::{StoreClientError, StoreClientResult};

/// A classified update specification.
///
/// Produced by [`UpdateSpec::classify`] and consumed by
/// [`UpdateSpec::into_document`], which applies the `$set` wrapping rule.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateSpec {
    /// Every update intent is expressed through operator keys; the document
    /// is forwarded to the store as-is. This variant also covers mixed
    /// documents, which the store itself will reject.
    Operators(Document),
    /// No top-level key is operator-prefixed; the document is a plain set of
    /// field assignments and will be wrapped in `$set`.
    PlainFields(Document),
}

impl UpdateSpec {
    /// Classifies an update document by scanning its top-level keys.
    ///
    /// # Errors
    ///
    /// Returns [`StoreClientError::InvalidArgument`] if the document is empty.
    pub fn classify(update: Document) -> StoreClientResult<Self> {
        if update.is_empty() {
            return Err(StoreClientError::InvalidArgument(
                "update document must not be empty".into(),
            ));
        }

        if update.keys().any(|key| key.starts_with('$')) {
            Ok(UpdateSpec::Operators(update))
        } else {
            Ok(UpdateSpec::PlainFields(update))
        }
    }

    /// Produces the document handed to the store, wrapping plain field
    /// documents in a single `$set` operator.
    pub fn into_document(self) -> Document {
        match self {
            UpdateSpec::Operators(update) => update,
            UpdateSpec::PlainFields(fields) => doc! { "$set": fields },
        }
    }
}
