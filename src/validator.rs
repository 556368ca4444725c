//! Key and value checks applied to event data before it is sent.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::ValidationError;

static MAP_KEY_REGEX: OnceLock<Regex> = OnceLock::new();

/// Keys of tag and property maps: lowercase letters, optionally separated by single dashes.
fn map_key_regex() -> &'static Regex {
    MAP_KEY_REGEX.get_or_init(|| Regex::new(r"^[a-z]+(-[a-z]+)*$").unwrap())
}

/// Ensure that every key in `required` is present in `data`.
///
/// Missing keys are reported in the order they appear in `required`.
pub fn validate_required_keys(
    required: &[&str],
    data: &Map<String, Value>,
) -> Result<(), ValidationError> {
    let missing: Vec<String> = required
        .iter()
        .filter(|key| !data.contains_key(**key))
        .map(|key| (*key).to_owned())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingRequiredKeys(missing))
    }
}

/// Ensure that `data` contains no keys outside of `allowed`.
///
/// Extra keys are reported in the iteration order of `data`.
pub fn validate_allowed_keys(
    allowed: &[&str],
    data: &Map<String, Value>,
) -> Result<(), ValidationError> {
    let invalid: Vec<String> = data
        .keys()
        .filter(|key| !allowed.contains(&key.as_str()))
        .cloned()
        .collect();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::InvalidKeys(invalid))
    }
}

/// Remove `null` entries from the object stored under `key`, in place.
///
/// Does nothing if `key` is absent or does not hold an object.
pub fn compact_nested(container: &mut Map<String, Value>, key: &str) {
    if let Some(Value::Object(nested)) = container.get_mut(key) {
        nested.retain(|_, value| !value.is_null());
    }
}

/// Check a flat map of tags or properties.
///
/// `None` and `null` are accepted as "no map". Otherwise every key must match
/// `^[a-z]+(-[a-z]+)*$` and every value must be a string, boolean or number. Entries are checked
/// in iteration order and the first offending one is reported.
pub fn validate_shallow_value_map(
    field: &str,
    map: Option<&Value>,
) -> Result<(), ValidationError> {
    let map = match map {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(ValidationError::NotAMap {
                key: field.to_owned(),
                value: other.clone(),
            })
        }
    };

    for (key, value) in map {
        if !map_key_regex().is_match(key) {
            return Err(ValidationError::InvalidMapKey(key.clone()));
        }

        if !matches!(value, Value::String(_) | Value::Bool(_) | Value::Number(_)) {
            return Err(ValidationError::InvalidMapValue {
                key: key.clone(),
                value: value.clone(),
            });
        }
    }

    Ok(())
}
