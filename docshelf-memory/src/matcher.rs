//! Filter evaluation for in-memory document matching.
//!
//! Interprets the Mongo-style filter subset this backend supports: top-level
//! equality, the comparison operators `$eq $ne $gt $gte $lt $lte`, membership
//! via `$in` / `$nin`, `$exists`, and the logical combinators `$and` / `$or`.
//! Field paths may be dotted to reach into nested documents.

use std::{cmp::Ordering, collections::HashMap};

use bson::{Bson, Document, datetime::DateTime};

use docshelf_core::error::{StoreClientError, StoreClientResult};

/// Type-erased, comparable representation of BSON values.
///
/// Normalizes all numeric types to f64 so integers and doubles compare
/// naturally, the way the store itself compares them.
#[derive(Debug)]
pub(crate) enum Comparable<'a> {
    Null,
    Bool(bool),
    Number(f64),
    DateTime(DateTime),
    String(&'a str),
    Array(Vec<Comparable<'a>>),
    Map(HashMap<&'a str, Comparable<'a>>),
}

impl<'a> From<&'a Bson> for Comparable<'a> {
    fn from(bson: &'a Bson) -> Self {
        match bson {
            Bson::Null => Comparable::Null,
            Bson::Boolean(value) => Comparable::Bool(*value),
            Bson::Int32(value) => Comparable::Number(*value as f64),
            Bson::Int64(value) => Comparable::Number(*value as f64),
            Bson::Double(value) => Comparable::Number(*value),
            Bson::DateTime(value) => Comparable::DateTime(*value),
            Bson::String(value) => Comparable::String(value),
            Bson::Array(arr) => Comparable::Array(arr.iter().map(Comparable::from).collect()),
            Bson::Document(doc) => Comparable::Map(
                doc.iter()
                    .map(|(k, v)| (k.as_str(), Comparable::from(v)))
                    .collect(),
            ),
            _ => Comparable::Null, // Other types are not comparable
        }
    }
}

impl<'a> PartialEq for Comparable<'a> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Comparable::Null, Comparable::Null) => true,
            (Comparable::Bool(a), Comparable::Bool(b)) => a == b,
            (Comparable::Number(a), Comparable::Number(b)) => a == b,
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a == b,
            (Comparable::String(a), Comparable::String(b)) => a == b,
            (Comparable::Array(a), Comparable::Array(b)) => a == b,
            (Comparable::Map(a), Comparable::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl<'a> PartialOrd for Comparable<'a> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Comparable::Bool(a), Comparable::Bool(b)) => a.partial_cmp(b),
            (Comparable::Number(a), Comparable::Number(b)) => a.partial_cmp(b),
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a.partial_cmp(b),
            (Comparable::String(a), Comparable::String(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

/// Resolves a possibly dotted field path within a document.
pub(crate) fn lookup<'a>(document: &'a Document, path: &str) -> Option<&'a Bson> {
    let mut parts = path.split('.');
    let mut value = document.get(parts.next()?)?;

    for part in parts {
        value = value.as_document()?.get(part)?;
    }

    Some(value)
}

/// Evaluates a filter document against a single document.
pub(crate) fn matches(document: &Document, filter: &Document) -> StoreClientResult<bool> {
    for (key, condition) in filter {
        let matched = match key.as_str() {
            "$and" => {
                let mut all = true;
                for clause in filter_clauses(key, condition)? {
                    if !matches(document, clause)? {
                        all = false;
                        break;
                    }
                }
                all
            }
            "$or" => {
                let mut any = false;
                for clause in filter_clauses(key, condition)? {
                    if matches(document, clause)? {
                        any = true;
                        break;
                    }
                }
                any
            }
            field => field_matches(document, field, condition)?,
        };

        if !matched {
            return Ok(false);
        }
    }

    Ok(true)
}

fn filter_clauses<'a>(
    operator: &str,
    condition: &'a Bson,
) -> StoreClientResult<impl Iterator<Item = &'a Document>> {
    let clauses = condition.as_array().ok_or_else(|| {
        StoreClientError::Operation(format!("{operator} requires an array of filter documents"))
    })?;

    Ok(clauses.iter().filter_map(Bson::as_document))
}

fn field_matches(document: &Document, field: &str, condition: &Bson) -> StoreClientResult<bool> {
    let value = lookup(document, field);

    match condition {
        // A non-empty all-operator document is a set of conditions on the
        // field; anything else is a literal equality match.
        Bson::Document(operators)
            if !operators.is_empty() && operators.keys().all(|key| key.starts_with('$')) =>
        {
            for (operator, operand) in operators {
                if !operator_matches(value, operator, operand)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        expected => Ok(match value {
            Some(found) => Comparable::from(found) == Comparable::from(expected),
            None => false,
        }),
    }
}

fn operator_matches(
    value: Option<&Bson>,
    operator: &str,
    operand: &Bson,
) -> StoreClientResult<bool> {
    match operator {
        "$exists" => Ok(value.is_some() == operand.as_bool().unwrap_or(true)),
        "$eq" => Ok(value.is_some_and(|found| Comparable::from(found) == Comparable::from(operand))),
        "$ne" => Ok(!value.is_some_and(|found| Comparable::from(found) == Comparable::from(operand))),
        "$gt" | "$gte" | "$lt" | "$lte" => {
            let Some(found) = value else {
                return Ok(false);
            };
            match Comparable::from(found).partial_cmp(&Comparable::from(operand)) {
                Some(ordering) => Ok(match operator {
                    "$gt" => ordering == Ordering::Greater,
                    "$gte" => ordering != Ordering::Less,
                    "$lt" => ordering == Ordering::Less,
                    "$lte" => ordering != Ordering::Greater,
                    _ => unreachable!(),
                }),
                None => Ok(false),
            }
        }
        "$in" => {
            let candidates = operand.as_array().ok_or_else(|| {
                StoreClientError::Operation("$in requires an array operand".into())
            })?;
            Ok(value.is_some_and(|found| {
                candidates
                    .iter()
                    .any(|candidate| Comparable::from(found) == Comparable::from(candidate))
            }))
        }
        "$nin" => {
            let candidates = operand.as_array().ok_or_else(|| {
                StoreClientError::Operation("$nin requires an array operand".into())
            })?;
            Ok(!value.is_some_and(|found| {
                candidates
                    .iter()
                    .any(|candidate| Comparable::from(found) == Comparable::from(candidate))
            }))
        }
        other => Err(StoreClientError::Operation(format!(
            "unsupported filter operator: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use chrono::{TimeZone, Utc};

    #[test]
    fn empty_filter_matches_everything() {
        let document = doc! { "name": "Bella" };
        assert!(matches(&document, &Document::new()).unwrap());
    }

    #[test]
    fn literal_equality_normalizes_numeric_types() {
        let document = doc! { "age": 3_i64 };
        assert!(matches(&document, &doc! { "age": 3_i32 }).unwrap());
        assert!(matches(&document, &doc! { "age": 3.0 }).unwrap());
        assert!(!matches(&document, &doc! { "age": 4 }).unwrap());
    }

    #[test]
    fn comparison_operators_apply_per_field() {
        let document = doc! { "age": 5 };

        assert!(matches(&document, &doc! { "age": { "$gte": 5 } }).unwrap());
        assert!(matches(&document, &doc! { "age": { "$gt": 4, "$lt": 6 } }).unwrap());
        assert!(!matches(&document, &doc! { "age": { "$lt": 5 } }).unwrap());
    }

    #[test]
    fn missing_field_fails_comparisons_but_satisfies_ne() {
        let document = doc! { "name": "Bella" };

        assert!(!matches(&document, &doc! { "age": { "$gt": 0 } }).unwrap());
        assert!(matches(&document, &doc! { "age": { "$ne": 3 } }).unwrap());
        assert!(matches(&document, &doc! { "age": { "$exists": false } }).unwrap());
    }

    #[test]
    fn membership_and_logical_combinators() {
        let document = doc! { "breed": "Beagle", "age": 2 };

        assert!(matches(&document, &doc! { "breed": { "$in": ["Beagle", "Husky"] } }).unwrap());
        assert!(matches(&document, &doc! { "breed": { "$nin": ["Husky"] } }).unwrap());
        assert!(
            matches(
                &document,
                &doc! { "$or": [ { "age": { "$gt": 10 } }, { "breed": "Beagle" } ] },
            )
            .unwrap()
        );
        assert!(
            !matches(
                &document,
                &doc! { "$and": [ { "age": 2 }, { "breed": "Husky" } ] },
            )
            .unwrap()
        );
    }

    #[test]
    fn dotted_paths_reach_nested_documents() {
        let document = doc! { "outcome": { "type": "Adoption" } };
        assert!(matches(&document, &doc! { "outcome.type": "Adoption" }).unwrap());
        assert!(!matches(&document, &doc! { "outcome.type": "Transfer" }).unwrap());
    }

    #[test]
    fn datetimes_compare_chronologically() {
        let earlier = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        let document = doc! { "intake": bson::DateTime::from_chrono(later) };

        let filter = doc! { "intake": { "$gt": bson::DateTime::from_chrono(earlier) } };
        assert!(matches(&document, &filter).unwrap());
    }

    #[test]
    fn unknown_operator_is_an_error() {
        let document = doc! { "age": 3 };
        let err = matches(&document, &doc! { "age": { "$near": 3 } }).unwrap_err();
        assert!(matches!(err, StoreClientError::Operation(_)));
    }
}
