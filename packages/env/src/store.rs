//! Environment variable store.
//!
//! Each key is one process environment variable. An unset, empty or
//! non-UTF-8 variable reads as absent.

use kvbind_core_store::{Error, Reader, Writer};

/// Store for environment variable access.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvStore;

impl EnvStore {
    pub fn new() -> Self {
        Self
    }

    /// Unset a variable. Removing an unset variable is not an error.
    pub fn remove(&mut self, key: &str) -> Result<(), Error> {
        validate(key)?;
        log::debug!("unset {}", key);
        std::env::remove_var(key);
        Ok(())
    }
}

impl Reader for EnvStore {
    fn read(&mut self, key: &str) -> Result<Option<String>, Error> {
        validate(key)?;

        let Some(raw) = std::env::var_os(key) else {
            return Ok(None);
        };

        match raw.into_string() {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                log::warn!("environment variable {} is not valid UTF-8; treating as unset", key);
                Ok(None)
            }
        }
    }
}

impl Writer for EnvStore {
    fn write(&mut self, key: &str, value: &str) -> Result<(), Error> {
        validate(key)?;
        if value.contains('\0') {
            return Err(Error::InvalidKey {
                key: key.to_string(),
                message: "value contains a NUL byte".to_string(),
            });
        }

        log::debug!("set {}", key);
        std::env::set_var(key, value);
        Ok(())
    }
}

/// `std::env` panics on these; reject them up front.
fn validate(key: &str) -> Result<(), Error> {
    let message = if key.is_empty() {
        "empty variable name"
    } else if key.contains('=') {
        "variable name contains '='"
    } else if key.contains('\0') {
        "variable name contains a NUL byte"
    } else {
        return Ok(());
    };

    Err(Error::InvalidKey {
        key: key.to_string(),
        message: message.to_string(),
    })
}
