//! Binding engine between typed values and flat key/value stores
//!
//! A value is described to the engine through the object-safe [`Bindable`]
//! trait: scalars, `Vec`, `Box` and `Option` come with implementations, and
//! structs declare a static schema table with [`bind_struct!`]. The engine
//! then moves values in and out of any [`Reader`]/[`Writer`]:
//!
//! - [`set`] writes a value (one entry per tagged leaf, or one JSON blob)
//! - [`get`] reads it back, optionally falling back to default literals
//! - [`Binder`] bundles a store with [`Options`]
//! - [`BindReader`]/[`BindWriter`] add `bind_get`/`bind_set` to every store
//!
//! # Example
//!
//! ```rust
//! use kvbind_bind::{bind_struct, get, set, MemoryStore, Options};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Service {
//!     name: String,
//!     port: u16,
//! }
//!
//! bind_struct!(Service {
//!     name.key("NAME"),
//!     port.key("PORT").default("8080"),
//! });
//!
//! let mut store = MemoryStore::with_entries([("NAME", "svc")]);
//! let mut service = Service::default();
//! get(&mut store, "", &mut service, &Options::tag().with_defaults(true)).unwrap();
//! assert_eq!(service, Service { name: "svc".into(), port: 8080 });
//!
//! set(&mut store, "", &Service { name: "api".into(), port: 81 }, &Options::tag()).unwrap();
//! assert_eq!(store.get("PORT"), Some("81"));
//! ```

mod binder;
mod coerce;
mod impls;
mod macros;
mod read;
mod schema;
mod write;

pub use binder::{get, set, BindMode, BindReader, BindWriter, Binder, Options};
pub use coerce::{canonical_text, float_to_int, float_to_uint, scalar_from_text, scalar_from_value};
pub use read::{assign_text, assign_value};
pub use schema::{Bindable, FieldDescriptor, FieldTag, Kind, Scalar, ScalarKind};
pub use write::compose;

// Re-export the store layer for convenience
pub use kvbind_core_store::{Error, MemoryStore, Reader, Store, Value, Writer};
