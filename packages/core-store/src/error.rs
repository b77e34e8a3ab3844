//! Error types shared by the binding engine and every store adapter.

/// Errors produced while binding values to a store.
///
/// Store adapters surface their own transport failures through
/// [`Error::Store`], boxed and untouched, so callers can downcast to the
/// adapter's error type when they need the details.
#[derive(Debug)]
pub enum Error {
    /// The value's kind has no defined coercion.
    UnsupportedType { type_name: String },

    /// The read target cannot be written through.
    InvalidTarget { message: String },

    /// A scalar read found no backing entry.
    KeyNotFound { key: String },

    /// A struct field has no external key while its siblings do.
    MissingTagAnnotation { type_name: String, field: String },

    /// A blob is not valid JSON or decoded to an unexpected shape.
    Decode { message: String },

    /// A composed value could not be encoded.
    Encode { message: String },

    /// Text or a decoded value cannot be coerced into the target scalar.
    Coercion {
        value: String,
        target: &'static str,
        message: String,
    },

    /// The key cannot be used with this store.
    InvalidKey { key: String, message: String },

    /// Error from the backing store, surfaced verbatim.
    Store(Box<dyn std::error::Error + Send + Sync>),

    /// Generic error with message.
    Other { message: String },
}

impl Error {
    /// Shorthand for [`Error::Decode`].
    pub fn decode(message: impl Into<String>) -> Self {
        Error::Decode {
            message: message.into(),
        }
    }

    /// Shorthand for [`Error::UnsupportedType`].
    pub fn unsupported(type_name: impl Into<String>) -> Self {
        Error::UnsupportedType {
            type_name: type_name.into(),
        }
    }

    /// Shorthand for [`Error::Coercion`].
    pub fn coercion(
        value: impl Into<String>,
        target: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Error::Coercion {
            value: value.into(),
            target,
            message: message.into(),
        }
    }

    /// Wrap a backing-store error.
    pub fn store(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Error::Store(Box::new(error))
    }

    /// Whether this error reports a missing key.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::KeyNotFound { .. })
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnsupportedType { type_name } => {
                write!(f, "type is not supported: {}", type_name)
            }
            Error::InvalidTarget { message } => write!(f, "invalid target: {}", message),
            Error::KeyNotFound { key } => write!(f, "key not found: {}", key),
            Error::MissingTagAnnotation { type_name, field } => {
                write!(f, "field '{}' of {} has no key tag", field, type_name)
            }
            Error::Decode { message } => write!(f, "decode error: {}", message),
            Error::Encode { message } => write!(f, "encode error: {}", message),
            Error::Coercion {
                value,
                target,
                message,
            } => write!(f, "cannot coerce '{}' into {}: {}", value, target, message),
            Error::InvalidKey { key, message } => write!(f, "invalid key '{}': {}", key, message),
            Error::Store(e) => write!(f, "store error: {}", e),
            Error::Other { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Store(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}
