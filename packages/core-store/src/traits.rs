//! Core traits: Reader, Writer.

use crate::Error;

/// Read string entries by key.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn Reader>`.
pub trait Reader {
    /// Read the entry stored under `key`.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - The key has no entry.
    /// * `Ok(Some(text))` - The stored text.
    /// * `Err(Error)` - The store failed, or reports absence as an error of its own.
    fn read(&mut self, key: &str) -> Result<Option<String>, Error>;
}

/// Write string entries by key.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn Writer>`.
pub trait Writer {
    /// Store `value` under `key`, replacing any previous entry.
    fn write(&mut self, key: &str, value: &str) -> Result<(), Error>;
}

/// Combined read/write.
pub trait Store: Reader + Writer {}
impl<T: Reader + Writer> Store for T {}

// Blanket implementations for references and boxes

impl<T: Reader + ?Sized> Reader for &mut T {
    fn read(&mut self, key: &str) -> Result<Option<String>, Error> {
        (*self).read(key)
    }
}

impl<T: Writer + ?Sized> Writer for &mut T {
    fn write(&mut self, key: &str, value: &str) -> Result<(), Error> {
        (*self).write(key, value)
    }
}

impl<T: Reader + ?Sized> Reader for Box<T> {
    fn read(&mut self, key: &str) -> Result<Option<String>, Error> {
        self.as_mut().read(key)
    }
}

impl<T: Writer + ?Sized> Writer for Box<T> {
    fn write(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.as_mut().write(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct TestStore {
        data: HashMap<String, String>,
    }

    impl Reader for TestStore {
        fn read(&mut self, key: &str) -> Result<Option<String>, Error> {
            Ok(self.data.get(key).cloned())
        }
    }

    impl Writer for TestStore {
        fn write(&mut self, key: &str, value: &str) -> Result<(), Error> {
            self.data.insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    #[test]
    fn object_safety_works() {
        let mut store = TestStore {
            data: HashMap::new(),
        };
        let boxed: &mut dyn Store = &mut store;

        boxed.write("NAME", "svc").unwrap();
        assert_eq!(boxed.read("NAME").unwrap(), Some("svc".to_string()));
        assert_eq!(boxed.read("MISSING").unwrap(), None);
    }

    #[test]
    fn boxed_store_forwards() {
        let mut boxed: Box<dyn Store> = Box::new(TestStore {
            data: HashMap::new(),
        });
        boxed.write("A", "1").unwrap();
        assert_eq!(boxed.read("A").unwrap(), Some("1".to_string()));
    }
}
