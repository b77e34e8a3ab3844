//! Read path: store entries -> typed value.

use kvbind_core_store::{Error, Reader, Value};
use kvbind_json_codec::JsonCodec;

use crate::binder::{BindMode, Options};
use crate::coerce::{scalar_from_text, scalar_from_value};
use crate::schema::{Bindable, FieldDescriptor, Kind};
use crate::write::missing_field;

/// Populate `target` from the entry (or entries) behind `key`.
pub(crate) fn read_value<R: Reader + ?Sized>(
    store: &mut R,
    key: &str,
    target: &mut dyn Bindable,
    options: &Options,
) -> Result<(), Error> {
    match target.kind() {
        Kind::Scalar(_) => {
            let text = read_required(store, key)?;
            assign_text(target, &text, options.use_tags)
        }
        Kind::Pointer => read_value(store, key, deref_mut(target)?, options),
        Kind::Struct => match options.mode {
            BindMode::Blob => read_blob(store, key, target, options),
            BindMode::Tag => read_fields(store, target, options),
        },
        Kind::Slice => read_blob(store, key, target, options),
        Kind::Unsupported => Err(Error::unsupported(target.type_name())),
    }
}

fn read_required<R: Reader + ?Sized>(store: &mut R, key: &str) -> Result<String, Error> {
    store.read(key)?.ok_or_else(|| Error::KeyNotFound {
        key: key.to_string(),
    })
}

fn read_blob<R: Reader + ?Sized>(
    store: &mut R,
    key: &str,
    target: &mut dyn Bindable,
    options: &Options,
) -> Result<(), Error> {
    let text = read_required(store, key)?;
    let decoded = JsonCodec.decode(&text)?;
    assign_value(target, &decoded, options.use_tags)
}

/// Gather a struct from one entry per field, falling back to defaults.
///
/// With tags on, a struct must tag all of its fields or none of them.
fn read_fields<R: Reader + ?Sized>(
    store: &mut R,
    target: &mut dyn Bindable,
    options: &Options,
) -> Result<(), Error> {
    if options.use_tags {
        check_tags(target)?;
    }

    let type_name = target.type_name();
    for (index, tag) in target.fields().iter().enumerate() {
        let field = match target.field_mut(index) {
            Some(field) => field,
            None => return Err(missing_field(type_name, tag.name)),
        };
        let descriptor = FieldDescriptor::describe(tag, field, options.use_tags);
        read_field(store, type_name, &descriptor, field, options)?;
    }

    Ok(())
}

/// A field with neither an entry nor an applicable default is left as it
/// is, so a nil pointer is only followed when there is something to assign.
fn read_field<R: Reader + ?Sized>(
    store: &mut R,
    type_name: &str,
    descriptor: &FieldDescriptor,
    field: &mut dyn Bindable,
    options: &Options,
) -> Result<(), Error> {
    if let Some(key) = descriptor.key() {
        // Nested structs keep reading their own leaves.
        if holds_struct(field) {
            return read_fields(store, resolve_mut(field)?, options);
        }

        if let Some(text) = store.read(key)? {
            log::trace!("{}.{} <- {}", type_name, descriptor.declared_name, key);
            return assign_text(field, &text, options.use_tags);
        }
    }

    match descriptor.default_value {
        Some(literal) if options.use_defaults => {
            log::trace!(
                "{}.{} <- default {:?}",
                type_name,
                descriptor.declared_name,
                literal
            );
            assign_text(field, literal, options.use_tags)
        }
        _ => Ok(()),
    }
}

fn holds_struct(field: &dyn Bindable) -> bool {
    match field.kind() {
        Kind::Struct => true,
        Kind::Pointer => field
            .pointee()
            .is_some_and(|pointee| pointee.kind() == Kind::Struct),
        _ => false,
    }
}

/// Assign store text: scalars are coerced, composites decoded as JSON.
pub fn assign_text(target: &mut dyn Bindable, text: &str, use_tags: bool) -> Result<(), Error> {
    match target.kind() {
        Kind::Scalar(kind) => target.set_scalar(scalar_from_text(kind, text)?),
        Kind::Pointer => assign_text(deref_mut(target)?, text, use_tags),
        Kind::Struct | Kind::Slice => {
            let decoded = JsonCodec.decode(text)?;
            assign_value(target, &decoded, use_tags)
        }
        Kind::Unsupported => Err(Error::unsupported(target.type_name())),
    }
}

/// Assign a decoded tree to a target, recursing through its shape.
///
/// A `null` source leaves the target untouched.
pub fn assign_value(target: &mut dyn Bindable, source: &Value, use_tags: bool) -> Result<(), Error> {
    if source.is_null() {
        return Ok(());
    }

    match target.kind() {
        Kind::Scalar(kind) => target.set_scalar(scalar_from_value(kind, source)?),
        Kind::Pointer => assign_value(deref_mut(target)?, source, use_tags),
        Kind::Struct => {
            let Value::Map(map) = source else {
                return Err(unexpected_shape(target, "map", source));
            };
            if use_tags {
                check_tags(target)?;
            }

            let type_name = target.type_name();
            for (index, tag) in target.fields().iter().enumerate() {
                let field = match target.field_mut(index) {
                    Some(field) => field,
                    None => return Err(missing_field(type_name, tag.name)),
                };
                let descriptor = FieldDescriptor::describe(tag, field, use_tags);
                let Some(key) = descriptor.key() else {
                    continue;
                };
                if let Some(item) = map.get(key) {
                    assign_value(field, item, use_tags)?;
                }
            }
            Ok(())
        }
        Kind::Slice => {
            let Value::Array(items) = source else {
                return Err(unexpected_shape(target, "array", source));
            };

            target.clear_elements();
            for item in items {
                let type_name = target.type_name();
                let element = target.push_element().ok_or_else(|| Error::Other {
                    message: format!("{} cannot grow", type_name),
                })?;
                assign_value(element, item, use_tags)?;
            }
            Ok(())
        }
        Kind::Unsupported => Err(Error::unsupported(target.type_name())),
    }
}

/// A struct tags all of its fields or none of them.
fn check_tags(target: &dyn Bindable) -> Result<(), Error> {
    let fields = target.fields();
    if !fields.iter().any(|tag| tag.is_tagged()) {
        return Ok(());
    }

    match fields.iter().find(|tag| !tag.is_tagged()) {
        Some(untagged) => Err(Error::MissingTagAnnotation {
            type_name: target.type_name().to_string(),
            field: untagged.name.to_string(),
        }),
        None => Ok(()),
    }
}

fn unexpected_shape(target: &dyn Bindable, expected: &str, found: &Value) -> Error {
    Error::decode(format!(
        "expected a {} for {}, found {}",
        expected,
        target.type_name(),
        found.kind_name()
    ))
}

/// Follow pointers until a non-pointer target is reached.
fn resolve_mut(target: &mut dyn Bindable) -> Result<&mut dyn Bindable, Error> {
    if target.kind() == Kind::Pointer {
        deref_mut(target)
    } else {
        Ok(target)
    }
}

/// Follow one level of indirection for writing.
///
/// A pointer that points nowhere cannot be read into; pointers to pointers
/// have no coercion.
fn deref_mut(target: &mut dyn Bindable) -> Result<&mut dyn Bindable, Error> {
    let type_name = target.type_name();
    let pointee = target.pointee_mut().ok_or_else(|| Error::InvalidTarget {
        message: format!("{} points nowhere", type_name),
    })?;
    if pointee.kind() == Kind::Pointer {
        return Err(Error::unsupported(format!(
            "{} (pointer to pointer)",
            type_name
        )));
    }
    Ok(pointee)
}
