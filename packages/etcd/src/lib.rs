//! etcd binding for kvbind
//!
//! [`Client`] talks to the etcd v2 keys API over blocking HTTP and is a
//! kvbind store. Its [`Client::set`]/[`Client::get`] bind typed values: scalars
//! are stored as text, composites always as one JSON document.
//!
//! ```no_run
//! use kvbind_etcd::Config;
//!
//! let config = Config::from_json(r#"{"endpoints": ["http://etcd-0:2379"], "timeout": 3}"#)?;
//! let mut client = config.new_client()?;
//!
//! client.set("replicas", &3u32, true)?;
//! let mut replicas = 0u32;
//! client.get("replicas", &mut replicas, true, false)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod client;
mod config;
mod error;
mod types;

pub use client::Client;
pub use config::Config;
pub use error::{Error, KEY_NOT_FOUND};
pub use types::{ErrorDocument, KeysResponse, Node};
