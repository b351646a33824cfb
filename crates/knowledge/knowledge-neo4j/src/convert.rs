//! JSON ⇄ Bolt value conversion for node properties.

use knowledge_core::ProfileAttributes;
use neo4rs::{BoltBoolean, BoltFloat, BoltInteger, BoltList, BoltMap, BoltNull, BoltString, BoltType};
use serde_json::{Number, Value};

/// Converts a JSON value to Bolt. Objects become maps; callers validate beforehand when maps
/// are not allowed (node properties).
pub fn json_to_bolt(value: &Value) -> BoltType {
    match value {
        Value::Null => BoltType::Null(BoltNull),
        Value::Bool(b) => BoltType::Boolean(BoltBoolean::new(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => BoltType::Integer(BoltInteger::new(i)),
            None => BoltType::Float(BoltFloat::new(n.as_f64().unwrap_or_default())),
        },
        Value::String(s) => BoltType::String(BoltString::new(s)),
        Value::Array(items) => {
            let mut list = BoltList::new();
            for item in items {
                list.push(json_to_bolt(item));
            }
            BoltType::List(list)
        }
        Value::Object(map) => {
            let mut bolt = BoltMap::new();
            for (key, item) in map {
                bolt.put(BoltString::new(key), json_to_bolt(item));
            }
            BoltType::Map(bolt)
        }
    }
}

/// Profile attributes as a Bolt map, for `SET u += $profile_data`.
pub fn properties_to_bolt(attributes: &ProfileAttributes) -> BoltType {
    let mut map = BoltMap::new();
    for (key, value) in attributes {
        map.put(BoltString::new(key), json_to_bolt(value));
    }
    BoltType::Map(map)
}

/// Converts a Bolt value back to JSON. Graph-structural values (nodes, paths, temporal and
/// spatial types) are not used as profile properties and map to `null`.
pub fn bolt_to_json(value: &BoltType) -> Value {
    match value {
        BoltType::Null(_) => Value::Null,
        BoltType::Boolean(b) => Value::Bool(b.value),
        BoltType::Integer(i) => Value::from(i.value),
        BoltType::Float(f) => Number::from_f64(f.value).map_or(Value::Null, Value::Number),
        BoltType::String(s) => Value::String(s.value.clone()),
        BoltType::List(list) => Value::Array(list.value.iter().map(bolt_to_json).collect()),
        BoltType::Map(map) => Value::Object(
            map.value
                .iter()
                .map(|(k, v)| (k.value.clone(), bolt_to_json(v)))
                .collect(),
        ),
        _ => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars_survive_conversion() {
        for value in [json!(null), json!(true), json!(42), json!(2.5), json!("Paris")] {
            assert_eq!(bolt_to_json(&json_to_bolt(&value)), value);
        }
    }

    #[test]
    fn test_integer_stays_integer() {
        assert!(matches!(json_to_bolt(&json!(30)), BoltType::Integer(_)));
        assert!(matches!(json_to_bolt(&json!(30.5)), BoltType::Float(_)));
    }

    #[test]
    fn test_list_of_strings() {
        let value = json!(["phone", "laptop"]);
        match json_to_bolt(&value) {
            BoltType::List(list) => assert_eq!(list.value.len(), 2),
            other => panic!("expected list, got {other:?}"),
        }
        assert_eq!(bolt_to_json(&json_to_bolt(&value)), value);
    }

    #[test]
    fn test_properties_to_bolt_keeps_null_for_removal() {
        let attrs: ProfileAttributes =
            serde_json::from_value(json!({"age": 30, "city": null})).unwrap();

        let bolt = properties_to_bolt(&attrs);

        assert_eq!(bolt_to_json(&bolt), json!({"age": 30, "city": null}));
    }
}
