use super::model::{Document, Field};
use crate::data::FormValues;

/// Computes the starting value of every field in `document`.
///
/// Fields offering pick-list values start on the first value. Other fields take
/// the non-empty caller-provided value for their `api_name`, falling back to the
/// field's `default_value`. Fields are applied in document order, so a later
/// field sharing an `api_name` replaces the earlier value, and clears it when
/// the later field has no value of its own. Fields without an `api_name` are
/// skipped.
pub fn initial_values(document: &Document, provided: &FormValues) -> FormValues {
    let mut values = FormValues::new();
    for field in document.fields() {
        let Some(api_name) = field.api_name.as_deref() else {
            continue;
        };
        match initial_value(field, api_name, provided) {
            Some(value) => values.insert(api_name, value),
            None => {
                values.remove(api_name);
            }
        }
    }
    values
}

fn initial_value(field: &Field, api_name: &str, provided: &FormValues) -> Option<String> {
    if let Some(first) = field.pick_list_values.as_ref().and_then(|v| v.first()) {
        return first.actual_value.clone();
    }
    provided
        .get(api_name)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| field.default_value.as_ref().and_then(default_as_text))
}

fn default_as_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
