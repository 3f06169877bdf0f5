//! Canonical JSON for plans and provenance records.
//!
//! Object keys are sorted at every depth while array order is kept, so plan bytes
//! depend only on plan content and never on field declaration order.

use ::serde::{Deserialize, Serialize};
use contract_core::errors::{ErrorInfo, GenError};
use serde_json::{Map, Value};

fn json_error(code: &str, err: serde_json::Error) -> GenError {
    GenError::Serde(ErrorInfo::new(code, err.to_string()))
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, val)| (key, sort_keys(val)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// JSON value of a plan (or any plan artifact) with keys in lexical order.
pub fn to_canonical_value<T: Serialize>(value: &T) -> Result<Value, GenError> {
    let value = serde_json::to_value(value).map_err(|err| json_error("plan-encode", err))?;
    Ok(sort_keys(value))
}

/// Compact canonical JSON bytes; the input of [`plan_fingerprint`](crate::plan_fingerprint).
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, GenError> {
    serde_json::to_vec(&to_canonical_value(value)?).map_err(|err| json_error("plan-write", err))
}

/// Reads a plan or provenance record back from JSON bytes.
pub fn from_json_slice<T: for<'de> Deserialize<'de>>(data: &[u8]) -> Result<T, GenError> {
    serde_json::from_slice(data).map_err(|err| json_error("plan-read", err))
}
