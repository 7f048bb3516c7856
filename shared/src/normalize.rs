//! Lenient readers for loosely-typed JSON coming from the advice service
//!
//! Nothing here fails: malformed numbers become `0`, missing text becomes
//! an empty string.

use serde_json::{Map, Value};

/// Canonical key paired with the legacy aliases consulted after it
pub type FieldAlias = (&'static str, &'static [&'static str]);

/// Convert any JSON value to a finite, non-negative number
pub fn coerce_number(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(0.0)
            }
        }
        _ => 0.0,
    };

    if parsed.is_finite() && parsed > 0.0 {
        parsed
    } else {
        0.0
    }
}

/// First present, non-null value among the canonical key and its aliases
pub fn resolve_field<'a>(object: &'a Map<String, Value>, alias: &FieldAlias) -> Option<&'a Value> {
    let (canonical, legacy) = alias;
    std::iter::once(*canonical)
        .chain(legacy.iter().copied())
        .filter_map(|key| object.get(key))
        .find(|value| !value.is_null())
}

/// Resolve a field through the alias table and coerce it to a number
pub fn resolve_number(object: &Map<String, Value>, alias: &FieldAlias) -> f64 {
    resolve_field(object, alias).map(coerce_number).unwrap_or(0.0)
}

/// Text field or an empty string
pub fn text_or_empty(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}
