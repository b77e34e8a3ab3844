//! Scalar coercion between fields, store text and decoded values.
//!
//! Integers read back from a decoded value always pass through a float:
//! the float is rendered as its shortest decimal text and the integral part
//! of that text is parsed as a 64-bit integer. Fractions are truncated
//! (3.9 becomes 3) and the result is later narrowed to the field's width
//! with wrapping.

use kvbind_core_store::{Error, Value};

use crate::schema::{Scalar, ScalarKind};

/// The canonical store text of a scalar.
///
/// Unsigned integers go through the signed 64-bit formatter, so values
/// above `i64::MAX` come out negative.
pub fn canonical_text(scalar: &Scalar) -> String {
    match scalar {
        Scalar::Int(v) => v.to_string(),
        Scalar::Uint(v) => (*v as i64).to_string(),
        Scalar::F32(v) => v.to_string(),
        Scalar::F64(v) => v.to_string(),
        Scalar::Bool(v) => v.to_string(),
        Scalar::Str(v) => v.clone(),
    }
}

/// The scalar as a node of a composed blob.
pub fn scalar_to_value(scalar: Scalar) -> Value {
    match scalar {
        Scalar::Int(v) => Value::Integer(v),
        Scalar::Uint(v) => Value::Unsigned(v),
        // Shortest f32 text, so 0.1f32 encodes as 0.1
        Scalar::F32(v) => Value::Float(v.to_string().parse().unwrap_or(f64::from(v))),
        Scalar::F64(v) => Value::Float(v),
        Scalar::Bool(v) => Value::Bool(v),
        Scalar::Str(v) => Value::String(v),
    }
}

/// Coerce store text (an environment value or a default literal).
pub fn scalar_from_text(kind: ScalarKind, text: &str) -> Result<Scalar, Error> {
    match kind {
        ScalarKind::String => Ok(Scalar::Str(text.to_string())),
        ScalarKind::Bool => parse_bool(text).map(Scalar::Bool),
        ScalarKind::Int => match text.parse::<i64>() {
            Ok(v) => Ok(Scalar::Int(v)),
            Err(e) => match text.parse::<f64>() {
                Ok(f) => float_to_int(f).map(Scalar::Int),
                Err(_) => Err(Error::coercion(text, kind.name(), e.to_string())),
            },
        },
        ScalarKind::Uint => match text.parse::<u64>() {
            Ok(v) => Ok(Scalar::Uint(v)),
            Err(e) => match text.parse::<f64>() {
                Ok(f) => float_to_uint(f).map(Scalar::Uint),
                Err(_) => Err(Error::coercion(text, kind.name(), e.to_string())),
            },
        },
        ScalarKind::Float => text
            .parse::<f64>()
            .map(Scalar::F64)
            .map_err(|e| Error::coercion(text, kind.name(), e.to_string())),
    }
}

/// Coerce a node of a decoded blob.
pub fn scalar_from_value(kind: ScalarKind, value: &Value) -> Result<Scalar, Error> {
    let mismatch = || {
        Error::coercion(
            format!("{:?}", value),
            kind.name(),
            format!("found {}", value.kind_name()),
        )
    };

    match kind {
        ScalarKind::String => match value {
            Value::String(s) => Ok(Scalar::Str(s.clone())),
            _ => Err(mismatch()),
        },
        ScalarKind::Bool => match value {
            Value::Bool(b) => Ok(Scalar::Bool(*b)),
            _ => Err(mismatch()),
        },
        ScalarKind::Int => value
            .as_f64()
            .ok_or_else(mismatch)
            .and_then(float_to_int)
            .map(Scalar::Int),
        ScalarKind::Uint => value
            .as_f64()
            .ok_or_else(mismatch)
            .and_then(float_to_uint)
            .map(Scalar::Uint),
        ScalarKind::Float => value.as_f64().ok_or_else(mismatch).map(Scalar::F64),
    }
}

/// Float -> shortest decimal text -> signed integer.
pub fn float_to_int(value: f64) -> Result<i64, Error> {
    let text = value.to_string();
    integral_part(&text)
        .parse::<i64>()
        .map_err(|e| Error::coercion(text.as_str(), ScalarKind::Int.name(), e.to_string()))
}

/// Float -> shortest decimal text -> unsigned integer.
pub fn float_to_uint(value: f64) -> Result<u64, Error> {
    let text = value.to_string();
    integral_part(&text)
        .parse::<u64>()
        .map_err(|e| Error::coercion(text.as_str(), ScalarKind::Uint.name(), e.to_string()))
}

fn integral_part(text: &str) -> &str {
    match text.find('.') {
        Some(dot) => &text[..dot],
        None => text,
    }
}

/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
fn parse_bool(text: &str) -> Result<bool, Error> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(Error::coercion(
            text,
            ScalarKind::Bool.name(),
            "expected true or false",
        )),
    }
}
