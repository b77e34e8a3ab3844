//! The shape description every bindable type provides.
//!
//! Instead of discovering a value's layout at run time, each type reports a
//! [`Kind`] and, for structs, a static table of [`FieldTag`]s. The engine walks
//! values through the object-safe [`Bindable`] trait and never needs to know
//! the concrete type.

use std::fmt;

use kvbind_core_store::Error;

/// Scalar families the engine knows how to coerce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// Signed integers of any width.
    Int,
    /// Unsigned integers of any width.
    Uint,
    /// `f32` and `f64`.
    Float,
    Bool,
    String,
}

impl ScalarKind {
    /// Name used in coercion errors.
    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::Int => "integer",
            ScalarKind::Uint => "unsigned integer",
            ScalarKind::Float => "float",
            ScalarKind::Bool => "bool",
            ScalarKind::String => "string",
        }
    }
}

/// The closed set of shapes a bindable value can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Scalar(ScalarKind),
    /// A record with a static field table.
    Struct,
    /// A growable sequence of one element type.
    Slice,
    /// A single level of indirection (`Box`, `Option`).
    Pointer,
    /// No defined coercion. Not produced by the built-in impls; a hand-written
    /// `Bindable` reports it for values that must never reach a store, and
    /// every read or write of one fails with `UnsupportedType`.
    Unsupported,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Scalar(kind) => write!(f, "{}", kind.name()),
            Kind::Struct => write!(f, "struct"),
            Kind::Slice => write!(f, "slice"),
            Kind::Pointer => write!(f, "pointer"),
            Kind::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// A scalar value in transit between a field and the engine.
///
/// Integers travel at full width; each field narrows them to its own width
/// when they are assigned.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Int(i64),
    Uint(u64),
    F32(f32),
    F64(f64),
    Bool(bool),
    Str(String),
}

/// One entry of a struct's static schema table.
///
/// Built with const builder calls, usually through [`bind_struct!`]:
///
/// ```rust
/// use kvbind_bind::FieldTag;
///
/// const PORT: FieldTag = FieldTag::new("port").key("PORT").default("8080");
/// assert_eq!(PORT.key, Some("PORT"));
/// ```
///
/// [`bind_struct!`]: crate::bind_struct
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldTag {
    /// The field's declared name.
    pub name: &'static str,
    /// External key annotation.
    pub key: Option<&'static str>,
    /// Default literal used when the key is absent and defaults are requested.
    pub default: Option<&'static str>,
}

impl FieldTag {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            key: None,
            default: None,
        }
    }

    pub const fn key(self, key: &'static str) -> Self {
        Self {
            key: Some(key),
            ..self
        }
    }

    pub const fn default(self, literal: &'static str) -> Self {
        Self {
            default: Some(literal),
            ..self
        }
    }

    /// Whether the field carries a non-empty key annotation.
    pub fn is_tagged(&self) -> bool {
        matches!(self.key, Some(key) if !key.is_empty())
    }
}

/// A field as seen by the engine for one binding call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Key the field is stored under. Empty when the field has none.
    pub external_key: &'static str,
    pub default_value: Option<&'static str>,
    pub declared_name: &'static str,
    pub kind: Kind,
}

impl FieldDescriptor {
    /// Derive the descriptor of `field` from its tag.
    ///
    /// With `use_tags` the key is the tag (empty if untagged), otherwise the
    /// declared name.
    pub fn describe(tag: &FieldTag, field: &dyn Bindable, use_tags: bool) -> Self {
        let external_key = if use_tags {
            tag.key.unwrap_or("")
        } else {
            tag.name
        };

        Self {
            external_key,
            default_value: tag.default.filter(|literal| !literal.is_empty()),
            declared_name: tag.name,
            kind: field.kind(),
        }
    }

    /// The external key, if the field has one.
    pub fn key(&self) -> Option<&'static str> {
        Some(self.external_key).filter(|key| !key.is_empty())
    }
}

/// A value the engine can read from and write into.
///
/// Implemented for the integer, float, `bool` and `String` scalars, for
/// `Vec<T>`, `Box<T>` and `Option<T>`, and for user structs through
/// [`bind_struct!`](crate::bind_struct). Every hook has a default so each
/// kind only implements the hooks that apply to it.
pub trait Bindable {
    /// The value's shape.
    fn kind(&self) -> Kind;

    /// Name used in error messages.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Current value of a scalar.
    fn scalar(&self) -> Option<Scalar> {
        None
    }

    /// Overwrite a scalar, narrowing to the field's width.
    fn set_scalar(&mut self, scalar: Scalar) -> Result<(), Error> {
        let _ = scalar;
        Err(Error::unsupported(self.type_name()))
    }

    /// Static schema table of a struct, in declaration order.
    fn fields(&self) -> &'static [FieldTag] {
        &[]
    }

    fn field(&self, index: usize) -> Option<&dyn Bindable> {
        let _ = index;
        None
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Bindable> {
        let _ = index;
        None
    }

    /// Elements of a slice.
    fn elements(&self) -> Vec<&dyn Bindable> {
        Vec::new()
    }

    fn clear_elements(&mut self) {}

    /// Append a zero-valued element and return it for assignment.
    fn push_element(&mut self) -> Option<&mut dyn Bindable> {
        None
    }

    /// Target of a pointer, `None` when it points nowhere.
    fn pointee(&self) -> Option<&dyn Bindable> {
        None
    }

    fn pointee_mut(&mut self) -> Option<&mut dyn Bindable> {
        None
    }
}
