//! kvbind: bind typed values to flat key/value stores.
//!
//! A struct declares its external keys once with [`bind_struct!`] and can
//! then be written to, and read back from, any store: the process
//! environment (one variable per field, with default literals) or an etcd
//! cluster (one JSON document per key).
//!
//! - [`store`]: the store traits, `Value`, `Error` and `MemoryStore`
//! - [`codec`]: the JSON codec used for composite entries
//! - [`bind`]: the binding engine
//! - [`env`]: the environment store (feature `env`)
//! - [`etcd`]: the etcd v2 client (feature `etcd`)

pub use kvbind_bind as bind;
pub use kvbind_core_store as store;
pub use kvbind_json_codec as codec;

#[cfg(feature = "env")]
pub use kvbind_env as env;

#[cfg(feature = "etcd")]
pub use kvbind_etcd as etcd;

pub use kvbind_bind::{bind_struct, get, set, Bindable, Binder, BindMode, Options};
pub use kvbind_core_store::{Error, MemoryStore, Reader, Store, Value, Writer};
