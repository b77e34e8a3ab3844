//! Write path: typed value -> store entries.

use std::collections::BTreeMap;

use kvbind_core_store::{Error, Value, Writer};
use kvbind_json_codec::JsonCodec;

use crate::binder::{BindMode, Options};
use crate::coerce::{canonical_text, scalar_to_value};
use crate::schema::{Bindable, FieldDescriptor, Kind};

/// Write `value` under `key`, dispatching on its kind.
pub(crate) fn write_value<W: Writer + ?Sized>(
    store: &mut W,
    key: &str,
    value: &dyn Bindable,
    options: &Options,
) -> Result<(), Error> {
    match value.kind() {
        Kind::Scalar(_) => {
            let scalar = value
                .scalar()
                .ok_or_else(|| Error::unsupported(value.type_name()))?;
            let text = canonical_text(&scalar);
            log::trace!("writing {} = {:?}", key, text);
            store.write(key, &text)
        }
        Kind::Pointer => write_value(store, key, deref(value)?, options),
        Kind::Struct => match options.mode {
            BindMode::Blob => write_blob(store, key, value, options),
            BindMode::Tag => write_fields(store, value, options),
        },
        // Slices have no per-leaf layout; they always collapse to one blob.
        Kind::Slice => write_blob(store, key, value, options),
        Kind::Unsupported => Err(Error::unsupported(value.type_name())),
    }
}

/// Spread a struct over one entry per field.
fn write_fields<W: Writer + ?Sized>(
    store: &mut W,
    value: &dyn Bindable,
    options: &Options,
) -> Result<(), Error> {
    for (index, tag) in value.fields().iter().enumerate() {
        let field = value
            .field(index)
            .ok_or_else(|| missing_field(value.type_name(), tag.name))?;
        let descriptor = FieldDescriptor::describe(tag, field, options.use_tags);

        match descriptor.key() {
            Some(key) => write_value(store, key, field, options)?,
            None => log::trace!(
                "skipping untagged field {}.{}",
                value.type_name(),
                descriptor.declared_name
            ),
        }
    }

    Ok(())
}

/// Write a whole composite as one JSON entry.
fn write_blob<W: Writer + ?Sized>(
    store: &mut W,
    key: &str,
    value: &dyn Bindable,
    options: &Options,
) -> Result<(), Error> {
    let composed = compose(value, options.use_tags)?;
    let text = JsonCodec.encode(&composed)?;
    log::trace!("writing blob {} ({} bytes)", key, text.len());
    store.write(key, &text)
}

/// Convert a value into a generic tree, keyed by tag or declared name.
pub fn compose(value: &dyn Bindable, use_tags: bool) -> Result<Value, Error> {
    match value.kind() {
        Kind::Scalar(_) => value
            .scalar()
            .map(scalar_to_value)
            .ok_or_else(|| Error::unsupported(value.type_name())),
        Kind::Pointer => compose(deref(value)?, use_tags),
        Kind::Struct => {
            let mut map = BTreeMap::new();
            for (index, tag) in value.fields().iter().enumerate() {
                let field = value
                    .field(index)
                    .ok_or_else(|| missing_field(value.type_name(), tag.name))?;
                let descriptor = FieldDescriptor::describe(tag, field, use_tags);
                if let Some(key) = descriptor.key() {
                    map.insert(key.to_string(), compose(field, use_tags)?);
                }
            }
            Ok(Value::Map(map))
        }
        Kind::Slice => value
            .elements()
            .into_iter()
            .map(|element| compose(element, use_tags))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Kind::Unsupported => Err(Error::unsupported(value.type_name())),
    }
}

/// Follow one level of indirection.
///
/// Nil pointers and pointers to pointers have no coercion.
fn deref(value: &dyn Bindable) -> Result<&dyn Bindable, Error> {
    let pointee = value
        .pointee()
        .ok_or_else(|| Error::unsupported(format!("{} (nil pointer)", value.type_name())))?;
    if pointee.kind() == Kind::Pointer {
        return Err(Error::unsupported(format!(
            "{} (pointer to pointer)",
            value.type_name()
        )));
    }
    Ok(pointee)
}

pub(crate) fn missing_field(type_name: &str, name: &str) -> Error {
    Error::Other {
        message: format!("{} lists field '{}' but does not expose it", type_name, name),
    }
}
