use std::time::Duration;

use kvbind_core_store::Error as StoreError;

/// etcd's "Key not found" error code.
pub const KEY_NOT_FOUND: u64 = 100;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid endpoint: {endpoint}")]
    InvalidEndpoint { endpoint: String },

    #[error("No endpoints configured")]
    NoEndpoints,

    #[error("Deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),

    #[error("{message} ({error_code}) [{cause}]")]
    Api {
        error_code: u64,
        message: String,
        cause: String,
        index: u64,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected response (HTTP {status}): {message}")]
    UnexpectedResponse { status: u16, message: String },
}

impl Error {
    /// Whether etcd reported the key as missing.
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, Error::Api { error_code, .. } if *error_code == KEY_NOT_FOUND)
    }

    /// Whether the call ran out of time.
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Http(e) => e.is_timeout(),
            Error::DeadlineExceeded(_) => true,
            _ => false,
        }
    }
}

impl From<Error> for StoreError {
    fn from(error: Error) -> Self {
        StoreError::store(error)
    }
}
