//! Environment-variable binding for kvbind
//!
//! [`EnvStore`] exposes the process environment as a kvbind store, and
//! [`set`]/[`get`] bind typed values against it in tag mode: every tagged
//! leaf of a struct is its own variable.
//!
//! # Example
//!
//! ```rust
//! use kvbind_bind::bind_struct;
//!
//! #[derive(Debug, Default)]
//! struct Service {
//!     name: String,
//!     port: u16,
//! }
//!
//! bind_struct!(Service {
//!     name.key("KVBIND_DOC_NAME"),
//!     port.key("KVBIND_DOC_PORT").default("8080"),
//! });
//!
//! std::env::set_var("KVBIND_DOC_NAME", "svc");
//!
//! let mut service = Service::default();
//! kvbind_env::get("", &mut service, true, true).unwrap();
//! assert_eq!(service.name, "svc");
//! assert_eq!(service.port, 8080);
//! ```
//!
//! The environment is process-global and unlocked: concurrent writers race,
//! and writing a struct is not atomic across its variables.

mod store;

pub use store::EnvStore;

use kvbind_bind::{Bindable, Options};
use kvbind_core_store::Error;

fn options(use_tags: bool, use_defaults: bool) -> Options {
    Options::tag()
        .with_tags(use_tags)
        .with_defaults(use_defaults)
}

/// Write `value` to the environment.
///
/// A scalar is written to `key`; a struct is spread over one variable per
/// tagged leaf (declared names when `use_tags` is off) and `key` is unused.
pub fn set(key: &str, value: &dyn Bindable, use_tags: bool) -> Result<(), Error> {
    kvbind_bind::set(&mut EnvStore, key, value, &options(use_tags, false))
}

/// Populate `target` from the environment.
///
/// Unset or empty variables of a struct are skipped, or filled from their
/// default literal when `use_defaults` is on. An unset scalar `key` is
/// [`Error::KeyNotFound`].
pub fn get(
    key: &str,
    target: &mut dyn Bindable,
    use_tags: bool,
    use_defaults: bool,
) -> Result<(), Error> {
    kvbind_bind::get(&mut EnvStore, key, target, &options(use_tags, use_defaults))
}
