//! JSON codec implementation.

use kvbind_core_store::{Error, Value};

use crate::convert::{json_to_value, value_to_json};

/// A codec that converts between `Value` and JSON text.
///
/// # Example
///
/// ```rust
/// use kvbind_json_codec::JsonCodec;
/// use kvbind_core_store::Value;
///
/// let codec = JsonCodec;
/// let value = codec.decode(r#"{"PORT": 8080}"#).unwrap();
///
/// assert_eq!(value.get("PORT"), Some(&Value::Float(8080.0)));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    /// Decode JSON text into a Value.
    pub fn decode(&self, text: &str) -> Result<Value, Error> {
        let json: serde_json::Value = serde_json::from_str(text).map_err(|e| Error::Decode {
            message: e.to_string(),
        })?;

        Ok(json_to_value(json))
    }

    /// Encode a Value as compact JSON text.
    pub fn encode(&self, value: &Value) -> Result<String, Error> {
        let json = value_to_json(value.clone())?;
        serde_json::to_string(&json).map_err(|e| Error::Encode {
            message: e.to_string(),
        })
    }
}
