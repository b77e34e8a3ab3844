//! Entry points: options, the free `set`/`get` functions and the store
//! extension traits.

use kvbind_core_store::{Error, Reader, Writer};

use crate::read::read_value;
use crate::schema::Bindable;
use crate::write::write_value;

/// How a struct maps onto store entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BindMode {
    /// One entry per tagged leaf, keyed by the leaf's own key.
    #[default]
    Tag,
    /// One JSON entry under the caller's key.
    Blob,
}

/// Per-call binding options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub mode: BindMode,
    /// Key fields by their annotation instead of their declared name.
    pub use_tags: bool,
    /// Fall back to default literals for absent keys (reads only).
    pub use_defaults: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            mode: BindMode::Tag,
            use_tags: true,
            use_defaults: false,
        }
    }
}

impl Options {
    pub fn tag() -> Self {
        Self::default()
    }

    pub fn blob() -> Self {
        Self {
            mode: BindMode::Blob,
            ..Self::default()
        }
    }

    pub fn with_tags(self, use_tags: bool) -> Self {
        Self { use_tags, ..self }
    }

    pub fn with_defaults(self, use_defaults: bool) -> Self {
        Self {
            use_defaults,
            ..self
        }
    }
}

/// Write `value` into `store` under `key`.
///
/// Scalars become one entry of canonical text. Structs are spread over one
/// entry per tagged leaf in [`BindMode::Tag`] (the top-level key is then
/// unused) or encoded as one JSON entry in [`BindMode::Blob`]. Slices are
/// always one JSON entry.
pub fn set<W: Writer + ?Sized>(
    store: &mut W,
    key: &str,
    value: &dyn Bindable,
    options: &Options,
) -> Result<(), Error> {
    log::debug!(
        "set {} ({}, {:?}, tags={})",
        key,
        value.kind(),
        options.mode,
        options.use_tags
    );
    write_value(store, key, value, options)
}

/// Populate `target` from `store`, mirroring [`set`].
///
/// A missing top-level entry is [`Error::KeyNotFound`]. Missing struct
/// leaves are skipped, or filled from their default literal when
/// `use_defaults` is on.
pub fn get<R: Reader + ?Sized>(
    store: &mut R,
    key: &str,
    target: &mut dyn Bindable,
    options: &Options,
) -> Result<(), Error> {
    log::debug!(
        "get {} ({}, {:?}, tags={}, defaults={})",
        key,
        target.kind(),
        options.mode,
        options.use_tags,
        options.use_defaults
    );
    read_value(store, key, target, options)
}

/// A store bundled with the options used for every call.
///
/// # Example
///
/// ```rust
/// use kvbind_bind::{bind_struct, Binder, MemoryStore, Options};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Service {
///     name: String,
///     port: u16,
/// }
///
/// bind_struct!(Service {
///     name.key("NAME"),
///     port.key("PORT"),
/// });
///
/// let mut binder = Binder::with_options(MemoryStore::new(), Options::blob());
/// let service = Service { name: "svc".into(), port: 8080 };
/// binder.set("cfg", &service).unwrap();
///
/// let mut back = Service::default();
/// binder.get("cfg", &mut back).unwrap();
/// assert_eq!(back, service);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Binder<S> {
    store: S,
    options: Options,
}

impl<S> Binder<S> {
    pub fn new(store: S) -> Self {
        Self::with_options(store, Options::default())
    }

    pub fn with_options(store: S, options: Options) -> Self {
        Self { store, options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S: Writer> Binder<S> {
    pub fn set(&mut self, key: &str, value: &dyn Bindable) -> Result<(), Error> {
        set(&mut self.store, key, value, &self.options)
    }
}

impl<S: Reader> Binder<S> {
    pub fn get(&mut self, key: &str, target: &mut dyn Bindable) -> Result<(), Error> {
        get(&mut self.store, key, target, &self.options)
    }
}

/// Extension trait for binding writes.
///
/// Automatically implemented for all `Writer` implementations.
pub trait BindWriter: Writer {
    fn bind_set(&mut self, key: &str, value: &dyn Bindable, options: &Options) -> Result<(), Error> {
        set(self, key, value, options)
    }
}

impl<W: Writer + ?Sized> BindWriter for W {}

/// Extension trait for binding reads.
///
/// Automatically implemented for all `Reader` implementations.
pub trait BindReader: Reader {
    fn bind_get(
        &mut self,
        key: &str,
        target: &mut dyn Bindable,
        options: &Options,
    ) -> Result<(), Error> {
        get(self, key, target, options)
    }
}

impl<R: Reader + ?Sized> BindReader for R {}

#[cfg(test)]
mod tests {
    use super::*;
    use kvbind_core_store::MemoryStore;

    #[derive(Debug, Default, PartialEq)]
    struct Service {
        name: String,
        port: u16,
    }

    crate::bind_struct!(Service {
        name.key("NAME"),
        port.key("PORT").default("8080"),
    });

    #[test]
    fn option_builders() {
        let options = Options::blob().with_tags(false).with_defaults(true);
        assert_eq!(options.mode, BindMode::Blob);
        assert!(!options.use_tags);
        assert!(options.use_defaults);

        assert_eq!(Options::tag(), Options::default());
    }

    #[test]
    fn extension_traits_on_any_store() {
        let mut store = MemoryStore::new();
        let service = Service {
            name: "svc".to_string(),
            port: 9000,
        };

        store.bind_set("ignored", &service, &Options::tag()).unwrap();
        assert_eq!(store.get("PORT"), Some("9000"));

        let mut back = Service::default();
        store.bind_get("ignored", &mut back, &Options::tag()).unwrap();
        assert_eq!(back, service);
    }

    #[test]
    fn binder_through_trait_object() {
        let mut inner = MemoryStore::with_entries([("NAME", "svc")]);
        {
            let store: &mut dyn kvbind_core_store::Store = &mut inner;
            let mut binder = Binder::with_options(store, Options::tag().with_defaults(true));

            let mut service = Service::default();
            binder.get("", &mut service).unwrap();
            assert_eq!(service.port, 8080);
        }
        assert_eq!(inner.len(), 1);
    }

    #[test]
    fn binder_hands_back_its_store() {
        let mut binder = Binder::new(MemoryStore::new());
        binder.set("PORT", &443u16).unwrap();
        assert_eq!(binder.store().get("PORT"), Some("443"));

        let store = binder.into_inner();
        assert_eq!(store.len(), 1);
    }
}
