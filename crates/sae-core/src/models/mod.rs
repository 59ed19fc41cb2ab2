pub mod clinical;
pub mod patient;
pub mod payload;
pub mod record;

pub use clinical::{ClinicalField, ClinicalSnapshot};
pub use patient::{PatientSnapshot, PriorAssessment};
pub use payload::{CreateSaeRequest, SaePayload};
pub use record::{AssessmentRecord, CodeList};

use serde_json::{Map, Value};

use crate::reconcile::{coerce_text, lookup};

/// Remove every spelling in `keys` from `map` and return the first one
/// (in `keys` order) that carried a non-null value.
pub(crate) fn take_first(map: &mut Map<String, Value>, keys: &[&str]) -> Option<Value> {
    let found = keys.iter().find_map(|key| lookup(map, key).cloned());
    for key in keys {
        map.remove(*key);
    }
    found
}

/// Identifiers arrive as strings, numbers or `{ "_id": ... }` objects.
pub(crate) fn id_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(_) | Value::Number(_) => coerce_text(value),
        Value::Object(obj) => ["_id", "id"]
            .iter()
            .find_map(|key| lookup(obj, key))
            .and_then(id_text)?,
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// A list of codes; scalar entries are coerced to text, anything else is dropped.
pub(crate) fn text_list(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter(|item| matches!(item, Value::String(_) | Value::Number(_)))
            .map(coerce_text)
            .collect(),
        _ => Vec::new(),
    }
}

pub(crate) fn text(value: Option<Value>) -> String {
    value.as_ref().map(coerce_text).unwrap_or_default()
}
