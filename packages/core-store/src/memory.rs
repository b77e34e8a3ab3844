//! In-memory store.

use std::collections::BTreeMap;

use crate::{Error, Reader, Writer};

/// A store keeping its entries in a `BTreeMap`.
///
/// Useful as a stand-in for the process environment or a remote store when
/// testing bindings.
///
/// # Example
///
/// ```rust
/// use kvbind_core_store::{MemoryStore, Reader, Writer};
///
/// let mut store = MemoryStore::new();
/// store.write("NAME", "svc").unwrap();
/// assert_eq!(store.read("NAME").unwrap(), Some("svc".to_string()));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with initial entries.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Borrow all entries.
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    /// Look up an entry without going through the `Reader` trait.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Remove an entry, returning it if it existed.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Reader for MemoryStore {
    fn read(&mut self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.entries.get(key).cloned())
    }
}

impl Writer for MemoryStore {
    fn write(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
