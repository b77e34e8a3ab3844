//! Core kvbind: the store layer
//!
//! Everything the binding engine talks to is a flat key/value store holding
//! strings:
//! - `Reader` / `Writer` / `Store`: read and write one entry by key
//! - `Value`: the generic tree a JSON blob decodes into
//! - `Error`: the error type shared by the engine and every adapter
//! - `MemoryStore`: an in-memory store for tests and embedding
//!
//! # Example
//!
//! ```rust
//! use kvbind_core_store::{Reader, Error};
//!
//! fn read_port(store: &mut dyn Reader) -> Result<Option<String>, Error> {
//!     store.read("PORT")
//! }
//! ```

mod error;
mod memory;
mod traits;
mod value;

pub use error::Error;
pub use memory::MemoryStore;
pub use traits::{Reader, Store, Writer};
pub use value::Value;
