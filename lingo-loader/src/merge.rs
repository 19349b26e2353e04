// Deep merge of message objects

use serde_json::{Map, Value};

/// Merge `source` into `target`.
///
/// Keys whose values are objects on both sides are merged recursively; any
/// other value in `source` replaces the one in `target`. Arrays are replaced
/// whole.
pub fn deep_merge(target: &mut Value, source: &Value) {
    if !(target.is_object() && source.is_object()) {
        *target = source.clone();
        return;
    }
    let (Some(target_map), Some(source_map)) = (target.as_object_mut(), source.as_object()) else {
        return;
    };

    for (key, value) in source_map {
        if value.is_object() {
            let slot = target_map
                .entry(key.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            deep_merge(slot, value);
        } else {
            target_map.insert(key.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_objects_merge() {
        let mut target = json!({});
        deep_merge(&mut target, &json!({"a": {"x": 1}}));
        deep_merge(&mut target, &json!({"a": {"y": 2}}));
        assert_eq!(target, json!({"a": {"x": 1, "y": 2}}));
    }

    #[test]
    fn test_arrays_replace() {
        let mut target = json!({});
        deep_merge(&mut target, &json!({"a": [1, 2]}));
        deep_merge(&mut target, &json!({"a": [3]}));
        assert_eq!(target, json!({"a": [3]}));
    }

    #[test]
    fn test_scalars_overwrite_and_keys_are_kept() {
        let mut target = json!({"greeting": "hello", "nav": {"home": "Home", "about": "About"}});
        deep_merge(&mut target, &json!({"greeting": "hi", "nav": {"about": "About us"}}));
        assert_eq!(
            target,
            json!({"greeting": "hi", "nav": {"home": "Home", "about": "About us"}})
        );
    }

    #[test]
    fn test_object_replaces_scalar() {
        let mut target = json!({"a": "text"});
        deep_merge(&mut target, &json!({"a": {"b": true}}));
        assert_eq!(target, json!({"a": {"b": true}}));
    }

    #[test]
    fn test_source_objects_are_copied() {
        let source = json!({"a": {"b": 1}});
        let mut target = json!({});
        deep_merge(&mut target, &source);
        target["a"]["b"] = json!(2);
        assert_eq!(source, json!({"a": {"b": 1}}));
    }
}
