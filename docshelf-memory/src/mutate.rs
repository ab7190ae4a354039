//! Update-operator application for the in-memory backend.
//!
//! Supports the operator subset this backend understands: `$set`, `$unset`,
//! and `$inc`. Unknown operators are reported as store errors, mirroring how
//! a real store rejects malformed update documents.

use bson::{Bson, Document};

use docshelf_core::error::{StoreClientError, StoreClientResult};

/// Applies an operator update document in place.
///
/// Returns `true` only when the document actually changed, so callers can
/// report modified counts rather than matched counts.
pub(crate) fn apply_update(document: &mut Document, update: &Document) -> StoreClientResult<bool> {
    let mut changed = false;

    for (operator, argument) in update {
        let fields = argument.as_document().ok_or_else(|| {
            StoreClientError::Operation(format!("{operator} requires a document argument"))
        })?;

        match operator.as_str() {
            "$set" => {
                for (field, value) in fields {
                    if document.get(field) != Some(value) {
                        document.insert(field.clone(), value.clone());
                        changed = true;
                    }
                }
            }
            "$unset" => {
                for field in fields.keys() {
                    if document.remove(field).is_some() {
                        changed = true;
                    }
                }
            }
            "$inc" => {
                for (field, delta) in fields {
                    let current = document.get(field).cloned();
                    let next = increment(field, current.as_ref(), delta)?;

                    if current.as_ref() != Some(&next) {
                        document.insert(field.clone(), next);
                        changed = true;
                    }
                }
            }
            other => {
                return Err(StoreClientError::Operation(format!(
                    "unsupported update operator: {other}"
                )));
            }
        }
    }

    Ok(changed)
}

fn increment(field: &str, current: Option<&Bson>, delta: &Bson) -> StoreClientResult<Bson> {
    if as_number(delta).is_none() {
        return Err(StoreClientError::Operation(format!(
            "$inc requires a numeric amount for field {field}"
        )));
    }

    let Some(current) = current else {
        // A missing field is treated as zero; the increment becomes the value.
        return Ok(delta.clone());
    };

    match (as_integer(current), as_integer(delta)) {
        (Some(lhs), Some(rhs)) => Ok(Bson::Int64(lhs + rhs)),
        _ => {
            let lhs = as_number(current).ok_or_else(|| {
                StoreClientError::Operation(format!("$inc applied to non-numeric field {field}"))
            })?;
            let rhs = as_number(delta).unwrap_or(0.0);
            Ok(Bson::Double(lhs + rhs))
        }
    }
}

fn as_integer(value: &Bson) -> Option<i64> {
    match value {
        Bson::Int32(v) => Some(*v as i64),
        Bson::Int64(v) => Some(*v),
        _ => None,
    }
}

fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(v) => Some(*v as f64),
        Bson::Int64(v) => Some(*v as f64),
        Bson::Double(v) => Some(*v),
        _ => None,
    }
}
