//! JSON codec for kvbind
//!
//! Blob-mode entries hold one JSON document describing a whole composite
//! value. This crate turns that text into the generic [`Value`] tree and
//! back, treating `serde_json` as a black box:
//! - `JsonCodec`: text <-> `Value`
//! - `json_to_value` / `value_to_json`: tree conversions
//!
//! Numbers always decode as `Value::Float`, the way a generic JSON decoder
//! hands them out.

mod codec;
mod convert;

pub use codec::JsonCodec;
pub use convert::{json_to_value, value_to_json};

pub use kvbind_core_store::{Error, Value};
