use crate::framework::ConformanceError;
use jr_state::OnchainState;
use serde_json::{Map, Value};

/// Normalizes the conventional vector encodings before deserialization:
/// `{"_isSet": true, "values": [...]}` becomes a plain array and
/// `{"_isMap": true, "entries": ...}` becomes a plain object (entries given
/// either as an object or as `[key, value]` pairs).
pub fn normalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            if is_marked(&map, "_isSet") {
                if let Some(Value::Array(items)) = map.get("values") {
                    return Value::Array(items.iter().cloned().map(normalize).collect());
                }
            }
            if is_marked(&map, "_isMap") {
                match map.get("entries") {
                    Some(Value::Object(entries)) => {
                        return Value::Object(
                            entries
                                .iter()
                                .map(|(k, v)| (k.clone(), normalize(v.clone())))
                                .collect(),
                        );
                    }
                    Some(Value::Array(pairs)) => {
                        let mut object = Map::new();
                        for pair in pairs {
                            if let Some([key, value]) =
                                pair.as_array().and_then(|p| p.get(0..2))
                            {
                                if let Some(key) = key.as_str() {
                                    object.insert(key.to_string(), normalize(value.clone()));
                                }
                            }
                        }
                        return Value::Object(object);
                    }
                    _ => {}
                }
            }
            Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, normalize(value)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(normalize).collect()),
        other => other,
    }
}

fn is_marked(map: &Map<String, Value>, marker: &str) -> bool {
    map.get(marker).and_then(Value::as_bool) == Some(true)
}

/// Hydrates a vector state tree into an [`OnchainState`].
pub fn onchain_state(value: &Value) -> Result<OnchainState, ConformanceError> {
    Ok(serde_json::from_value(normalize(value.clone()))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_wrappers_become_arrays() {
        let value = json!({"_isSet": true, "values": ["a", "b"]});
        assert_eq!(normalize(value), json!(["a", "b"]));
    }

    #[test]
    fn map_wrappers_become_objects() {
        let from_entries = json!({"_isMap": true, "entries": {"k": 1}});
        assert_eq!(normalize(from_entries), json!({"k": 1}));

        let from_pairs = json!({"_isMap": true, "entries": [["k", 1], ["l", 2]]});
        assert_eq!(normalize(from_pairs), json!({"k": 1, "l": 2}));
    }

    #[test]
    fn wrappers_are_unwrapped_recursively() {
        let value = json!({
            "outer": {"_isMap": true, "entries": {"inner": {"_isSet": true, "values": [1]}}}
        });
        assert_eq!(normalize(value), json!({"outer": {"inner": [1]}}));
    }

    #[test]
    fn plain_trees_pass_through() {
        let value = json!({"rho": {}, "omega": {}, "xi": {}});
        assert_eq!(normalize(value.clone()), value);
    }

    #[test]
    fn empty_state_hydrates() {
        let state = onchain_state(&json!({})).unwrap();
        assert!(state.rho.is_empty());
        assert!(state.psi_o.is_empty());
    }
}
