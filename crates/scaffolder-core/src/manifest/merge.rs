//! Recursive deep merge of JSON manifests
//!
//! Container values (objects) merge key by key, everything else (scalars,
//! arrays, null) is overwritten by the later source.

use serde_json::{Map, Value};

/// Merge each source into `target`, left to right, and return `target`.
///
/// Later sources win over earlier ones at every key path, except that
/// object values are merged recursively instead of replaced. Arrays are
/// replaced wholesale. When either side is not an object the merge at that
/// level is a no-op.
pub fn merge_object<'a>(target: &'a mut Value, sources: &[&Value]) -> &'a mut Value {
    let Some((source, rest)) = sources.split_first() else {
        return target;
    };

    if let (Value::Object(target_map), Value::Object(source_map)) = (&mut *target, source) {
        merge_maps(target_map, source_map);
    }

    merge_object(target, rest)
}

fn merge_maps(target: &mut Map<String, Value>, source: &Map<String, Value>) {
    for (key, value) in source {
        if value.is_object() {
            let slot = target.entry(key.clone()).or_insert(Value::Null);
            if is_falsy(slot) {
                *slot = Value::Object(Map::new());
            }
            merge_object(slot, &[value]);
        } else {
            target.insert(key.clone(), value.clone());
        }
    }
}

/// Values that count as "unset" when a nested object needs a home
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_disjoint_keys() {
        let mut target = json!({ "a": 1, "b": 2 });
        merge_object(&mut target, &[&json!({ "c": 3, "d": 4 })]);
        assert_eq!(target, json!({ "a": 1, "b": 2, "c": 3, "d": 4 }));
    }

    #[test]
    fn test_scalar_override() {
        let mut target = json!({ "x": 1 });
        merge_object(&mut target, &[&json!({ "x": 2 })]);
        assert_eq!(target, json!({ "x": 2 }));
    }

    #[test]
    fn test_nested_objects_merge() {
        let mut target = json!({ "a": { "x": 1 } });
        merge_object(&mut target, &[&json!({ "a": { "y": 2 } })]);
        assert_eq!(target, json!({ "a": { "x": 1, "y": 2 } }));
    }

    #[test]
    fn test_arrays_are_replaced() {
        let mut target = json!({ "a": [1, 2] });
        merge_object(&mut target, &[&json!({ "a": [3] })]);
        assert_eq!(target, json!({ "a": [3] }));
    }

    #[test]
    fn test_later_sources_win() {
        let mut target = json!({ "scripts": { "lint": "old" }, "version": "0.0.0" });
        let first = json!({ "scripts": { "lint": "eslint ." }, "version": "1.0.0" });
        let second = json!({ "scripts": { "lint": "eslint --fix ." } });

        merge_object(&mut target, &[&first, &second]);

        assert_eq!(
            target,
            json!({ "scripts": { "lint": "eslint --fix ." }, "version": "1.0.0" })
        );
    }

    #[test]
    fn test_null_overwrites() {
        let mut target = json!({ "a": { "x": 1 }, "b": 1 });
        merge_object(&mut target, &[&json!({ "a": null })]);
        assert_eq!(target, json!({ "a": null, "b": 1 }));
    }

    #[test]
    fn test_falsy_target_replaced_by_object() {
        let mut target = json!({ "a": null, "b": "", "c": 0, "d": false });
        let source = json!({ "a": { "x": 1 }, "b": { "x": 1 }, "c": { "x": 1 }, "d": { "x": 1 } });
        merge_object(&mut target, &[&source]);
        assert_eq!(target, source);
    }

    #[test]
    fn test_truthy_scalar_target_is_kept() {
        let mut target = json!({ "a": "keep", "b": [1] });
        merge_object(&mut target, &[&json!({ "a": { "x": 1 }, "b": { "x": 1 } })]);
        assert_eq!(target, json!({ "a": "keep", "b": [1] }));
    }

    #[test]
    fn test_non_object_target_is_noop() {
        let mut target = json!([1, 2]);
        merge_object(&mut target, &[&json!({ "a": 1 })]);
        assert_eq!(target, json!([1, 2]));

        let mut target = json!({ "a": 1 });
        merge_object(&mut target, &[&json!("scalar"), &json!({ "b": 2 })]);
        assert_eq!(target, json!({ "a": 1, "b": 2 }));
    }

    #[test]
    fn test_no_sources_returns_target() {
        let mut target = json!({ "a": 1 });
        let returned = merge_object(&mut target, &[]);
        returned["b"] = json!(2);
        assert_eq!(target, json!({ "a": 1, "b": 2 }));
    }

    #[test]
    fn test_key_order_preserved() {
        let mut target = json!({ "name": "app", "scripts": {} });
        merge_object(&mut target, &[&json!({ "devDependencies": {}, "name": "other" })]);
        let keys: Vec<&String> = target.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["name", "scripts", "devDependencies"]);
    }
}
