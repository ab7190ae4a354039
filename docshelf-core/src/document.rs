//! Conversion helpers between typed values and BSON documents.
//!
//! This layer enforces no schema; documents are plain field-to-value
//! mappings. These helpers exist so callers can persist `Serialize` types and
//! read them back without hand-building [`Document`] values.

use bson::{Bson, Document, de::deserialize_from_bson, ser::serialize_to_bson};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{StoreClientError, StoreClientResult};

/// Serializes a value into a BSON document.
///
/// # Errors
///
/// Returns [`StoreClientError::Serialization`] if serialization fails or the
/// value does not serialize to a document (e.g. a bare number or sequence).
pub fn to_document<T: Serialize>(value: &T) -> StoreClientResult<Document> {
    match serialize_to_bson(value)? {
        Bson::Document(document) => Ok(document),
        other => Err(StoreClientError::Serialization(format!(
            "expected a document, got {:?}",
            other.element_type()
        ))),
    }
}

/// Deserializes a BSON document into a typed value.
///
/// # Errors
///
/// Returns [`StoreClientError::Serialization`] if the document does not match
/// the target type.
pub fn from_document<T: DeserializeOwned>(document: Document) -> StoreClientResult<T> {
    Ok(deserialize_from_bson(Bson::Document(document))?)
}
