// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Schema-less document model.

use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde::ser::{Error as _, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Untyped document: field names mapped to arbitrary JSON values.
pub type Document = Map<String, Value>;

/// Bookkeeping fields the Firestore client adds to every document it reads.
const FIRESTORE_ID_FIELD: &str = "_firestore_id";
const FIRESTORE_INJECTED_FIELDS: [&str; 3] = [
    "_firestore_full_id",
    "_firestore_created",
    "_firestore_updated",
];

/// A document together with its identifier.
///
/// Serializes flat, as `{ "id": ..., ...fields }`, with exactly one `id`
/// key. If the document has an `id` field of its own, that value is the one
/// written.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WithId<T> {
    pub id: String,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> Serialize for WithId<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut fields = match serde_json::to_value(&self.data).map_err(S::Error::custom)? {
            Value::Object(fields) => fields,
            other => {
                return Err(S::Error::custom(format!(
                    "document {} is not a map: {}",
                    self.id, other
                )))
            }
        };
        fields
            .entry("id")
            .or_insert_with(|| Value::String(self.id.clone()));
        fields.serialize(serializer)
    }
}

/// Split a document as read back from Firestore into its id and its own fields.
///
/// Returns `None` for the id if the client did not supply one.
pub(crate) fn split_meta(mut raw: Document) -> (Option<String>, Document) {
    let id = match raw.remove(FIRESTORE_ID_FIELD) {
        Some(Value::String(id)) => Some(id),
        _ => None,
    };
    for field in FIRESTORE_INJECTED_FIELDS {
        raw.remove(field);
    }
    (id, raw)
}

/// Convert a document's own fields into the caller's type.
pub(crate) fn from_document<T: DeserializeOwned>(fields: Document) -> Result<T, AppError> {
    Ok(serde_json::from_value(Value::Object(fields))?)
}
