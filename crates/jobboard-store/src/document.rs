//! Semi-structured documents and typed conversion.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Result, StoreError};
use crate::keys;

/// A stored document: a JSON object.
pub type Document = Map<String, Value>;

/// Convert a typed value into a document.
///
/// # Errors
///
/// Returns `StoreError::Serialization` if the value does not serialize to an object.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document> {
    match serde_json::to_value(value) {
        Ok(Value::Object(doc)) => Ok(doc),
        Ok(other) => Err(StoreError::Serialization(format!(
            "expected an object, got {}",
            value_kind(&other)
        ))),
        Err(e) => Err(StoreError::Serialization(e.to_string())),
    }
}

/// Decode a document into a typed value.
///
/// # Errors
///
/// Returns `StoreError::Serialization` if the document does not match `T`.
pub fn from_document<T: DeserializeOwned>(doc: Document) -> Result<T> {
    serde_json::from_value(Value::Object(doc)).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Apply a partial update to `target`.
///
/// Each key of `fields` is a field path. Missing intermediate objects are
/// created; an intermediate that is not an object is replaced by one.
/// Fields not named in `fields` are left untouched.
///
/// # Errors
///
/// Returns `StoreError::InvalidKey` if a field path is malformed. No field is
/// written in that case.
pub fn apply_update(target: &mut Document, fields: Document) -> Result<()> {
    let mut parsed = Vec::with_capacity(fields.len());
    for (path, value) in fields {
        let segments: Vec<String> = keys::field_path(&path)?
            .into_iter()
            .map(str::to_string)
            .collect();
        parsed.push((segments, value));
    }

    for (segments, value) in parsed {
        set_path(target, &segments, value);
    }
    Ok(())
}

fn set_path(target: &mut Document, segments: &[String], value: Value) {
    match segments {
        [] => {}
        [last] => {
            target.insert(last.clone(), value);
        }
        [head, rest @ ..] => {
            let child = target
                .entry(head.clone())
                .or_insert_with(|| Value::Object(Document::new()));
            if let Value::Object(map) = child {
                set_path(map, rest, value);
            } else {
                let mut map = Document::new();
                set_path(&mut map, rest, value);
                *child = Value::Object(map);
            }
        }
    }
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
