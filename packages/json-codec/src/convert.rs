//! Conversions between Value and serde_json::Value.

use kvbind_core_store::{Error, Value};

/// Convert our Value to serde_json::Value.
///
/// Non-finite floats have no JSON representation and fail with
/// [`Error::Encode`].
pub fn value_to_json(value: Value) -> Result<serde_json::Value, Error> {
    Ok(match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(b),
        Value::Integer(i) => serde_json::Value::Number(i.into()),
        Value::Unsigned(u) => serde_json::Value::Number(u.into()),
        Value::Float(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .ok_or_else(|| Error::Encode {
                message: format!("unsupported float value: {}", f),
            })?,
        Value::String(s) => serde_json::Value::String(s),
        Value::Array(arr) => serde_json::Value::Array(
            arr.into_iter()
                .map(value_to_json)
                .collect::<Result<_, _>>()?,
        ),
        Value::Map(map) => serde_json::Value::Object(
            map.into_iter()
                .map(|(k, v)| Ok((k, value_to_json(v)?)))
                .collect::<Result<_, Error>>()?,
        ),
    })
}

/// Convert serde_json::Value to our Value.
///
/// Every JSON number becomes `Value::Float`, whatever its literal looked
/// like. Integer fields are recovered from the float later.
pub fn json_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => match n.as_f64() {
            Some(f) => Value::Float(f),
            // Fallback for numbers f64 cannot hold
            None => Value::String(n.to_string()),
        },
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => Value::Array(arr.into_iter().map(json_to_value).collect()),
        serde_json::Value::Object(map) => Value::Map(
            map.into_iter()
                .map(|(k, v)| (k, json_to_value(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn json_to_value_numbers_are_floats() {
        let json = serde_json::json!({
            "integer": 42,
            "float": 2.75,
            "negative": -100
        });

        match json_to_value(json) {
            Value::Map(map) => {
                assert_eq!(map.get("integer"), Some(&Value::Float(42.0)));
                assert_eq!(map.get("negative"), Some(&Value::Float(-100.0)));
                assert_eq!(map.get("float"), Some(&Value::Float(2.75)));
            }
            other => panic!("expected map, got {:?}", other),
        }
    }

    #[test]
    fn json_to_value_array() {
        let json = serde_json::json!([1, "two", true, null]);
        match json_to_value(json) {
            Value::Array(arr) => {
                assert_eq!(arr.len(), 4);
                assert_eq!(arr[0], Value::Float(1.0));
                assert_eq!(arr[1], Value::String("two".to_string()));
                assert_eq!(arr[2], Value::Bool(true));
                assert_eq!(arr[3], Value::Null);
            }
            other => panic!("expected array, got {:?}", other),
        }
    }

    #[test]
    fn value_to_json_keeps_integers_exact() {
        let value = Value::Array(vec![
            Value::Integer(i64::MIN),
            Value::Unsigned(u64::MAX),
        ]);
        let json = value_to_json(value).unwrap();
        assert_eq!(json, serde_json::json!([i64::MIN, u64::MAX]));
    }

    #[test]
    fn value_to_json_map() {
        let mut map = BTreeMap::new();
        map.insert("key".to_string(), Value::String("value".to_string()));
        map.insert("num".to_string(), Value::Integer(42));

        let json = value_to_json(Value::Map(map)).unwrap();
        assert_eq!(json, serde_json::json!({"key": "value", "num": 42}));
    }

    #[test]
    fn value_to_json_nan_is_an_error() {
        let result = value_to_json(Value::Float(f64::NAN));
        assert!(matches!(result, Err(Error::Encode { .. })));

        let nested = Value::Array(vec![Value::Float(f64::INFINITY)]);
        assert!(value_to_json(nested).is_err());
    }
}
