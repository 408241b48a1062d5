//! Outward record representation
//!
//! Internal identity and version fields never leave the store. The identity
//! is exposed as a stable `id` alias instead.

use serde_json::{Map, Value};

use super::plugins::{ID_FIELD, VERSION_FIELD};
use super::revision::REVISION_FIELD;

/// Public identity alias
pub const PUBLIC_ID_FIELD: &str = "id";

const INTERNAL_FIELDS: [&str; 3] = [ID_FIELD, VERSION_FIELD, REVISION_FIELD];

/// Converts a stored record into its public form.
///
/// Non-object values are returned unchanged.
pub fn to_public(record: &Value) -> Value {
    let obj = match record.as_object() {
        Some(obj) => obj,
        None => return record.clone(),
    };

    let mut public = Map::with_capacity(obj.len());
    if let Some(id) = obj.get(ID_FIELD).filter(|v| !v.is_null()) {
        let id = match id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        public.insert(PUBLIC_ID_FIELD.to_string(), Value::String(id));
    }

    for (key, value) in obj {
        if INTERNAL_FIELDS.contains(&key.as_str()) || key == PUBLIC_ID_FIELD {
            continue;
        }
        public.insert(key.clone(), value.clone());
    }

    Value::Object(public)
}
