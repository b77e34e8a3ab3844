use std::time::{Duration, Instant};

use reqwest::blocking::{Client as HttpClient, RequestBuilder, Response};
use url::Url;

use kvbind_bind::{Bindable, Options};
use kvbind_core_store::{Error as StoreError, Reader, Writer};

use crate::config::Config;
use crate::error::Error;
use crate::types::{ErrorDocument, KeysResponse};

/// A kvbind store backed by the etcd v2 keys API
///
/// - `read(key)` performs `GET {endpoint}/v2/keys/{key}` and yields the
///   node's value
/// - `write(key, value)` performs `PUT {endpoint}/v2/keys/{key}` with the
///   form body `value=<text>`
///
/// Every call has its own deadline of the configured timeout. Endpoints are
/// tried in order, moving on only when a connection cannot be established.
/// Error documents from the server are surfaced as [`Error::Api`].
///
/// # Example
///
/// ```no_run
/// use kvbind_bind::bind_struct;
/// use kvbind_etcd::Config;
///
/// #[derive(Debug, Default)]
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
/// let mut client = Config::default().new_client()?;
/// client.set("cfg", &Service { name: "svc".into(), port: 8080 }, true)?;
///
/// let mut service = Service::default();
/// client.get("cfg", &mut service, true, false)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
    endpoints: Vec<Url>,
    timeout: Duration,
}

impl Client {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let endpoints = config
            .endpoints
            .iter()
            .map(|endpoint| parse_endpoint(endpoint))
            .collect::<Result<Vec<_>, _>>()?;
        if endpoints.is_empty() {
            return Err(Error::NoEndpoints);
        }

        let timeout = config.timeout_duration();
        let http = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            endpoints,
            timeout,
        })
    }

    pub fn endpoints(&self) -> &[Url] {
        &self.endpoints
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Write `value` under `key`.
    ///
    /// Scalars are stored as their canonical text; structs and slices are
    /// always stored as one JSON document.
    pub fn set(&mut self, key: &str, value: &dyn Bindable, use_tags: bool) -> Result<(), StoreError> {
        kvbind_bind::set(self, key, value, &Options::blob().with_tags(use_tags))
    }

    /// Populate `target` from `key`, mirroring [`Client::set`].
    ///
    /// Composites are decoded from one JSON document, so `use_defaults` has
    /// no effect on them. A missing key fails with etcd's own error
    /// (`errorCode` 100).
    pub fn get(
        &mut self,
        key: &str,
        target: &mut dyn Bindable,
        use_tags: bool,
        use_defaults: bool,
    ) -> Result<(), StoreError> {
        let options = Options::blob()
            .with_tags(use_tags)
            .with_defaults(use_defaults);
        kvbind_bind::get(self, key, target, &options)
    }

    /// Fetch the raw value stored under `key`.
    pub fn get_value(&self, key: &str) -> Result<String, Error> {
        let response = self.send(key, |http, url| http.get(url))?;
        let body: KeysResponse = decode_success(response)?;

        body.node.value.ok_or_else(|| Error::UnexpectedResponse {
            status: 200,
            message: format!("{} is a directory", body.node.key),
        })
    }

    /// Store `value` under `key` verbatim.
    pub fn put_value(&self, key: &str, value: &str) -> Result<(), Error> {
        let response = self.send(key, |http, url| http.put(url).form(&[("value", value)]))?;
        let _: KeysResponse = decode_success(response)?;
        Ok(())
    }

    /// Issue one request, failing over between endpoints on connect errors.
    fn send<F>(&self, key: &str, build: F) -> Result<Response, Error>
    where
        F: Fn(&HttpClient, Url) -> RequestBuilder,
    {
        let deadline = Instant::now() + self.timeout;
        let mut last_error = None;

        for endpoint in &self.endpoints {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(Error::DeadlineExceeded(self.timeout));
            }

            let url = key_url(endpoint, key)?;
            log::debug!("etcd request {}", url);

            match build(&self.http, url).timeout(remaining).send() {
                Ok(response) => return Ok(response),
                Err(e) if e.is_connect() => {
                    log::debug!("cannot reach {}: {}", endpoint, e);
                    last_error = Some(Error::Http(e));
                }
                Err(e) => return Err(Error::Http(e)),
            }
        }

        Err(last_error.unwrap_or(Error::NoEndpoints))
    }
}

impl Reader for Client {
    fn read(&mut self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(Some(self.get_value(key)?))
    }
}

impl Writer for Client {
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        Ok(self.put_value(key, value)?)
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, Error> {
    let url = Url::parse(endpoint)?;
    if url.cannot_be_a_base() {
        return Err(Error::InvalidEndpoint {
            endpoint: endpoint.to_string(),
        });
    }
    Ok(url)
}

/// `{endpoint}/v2/keys/{key}`, with each key segment percent-encoded.
fn key_url(endpoint: &Url, key: &str) -> Result<Url, Error> {
    let mut url = endpoint.clone();
    {
        let mut segments = url.path_segments_mut().map_err(|_| Error::InvalidEndpoint {
            endpoint: endpoint.to_string(),
        })?;
        segments.pop_if_empty().extend(["v2", "keys"]);
        segments.extend(key.split('/').filter(|segment| !segment.is_empty()));
    }
    Ok(url)
}

fn decode_success<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, Error> {
    let status = response.status();
    let text = response.text()?;

    if status.is_success() {
        return Ok(serde_json::from_str(&text)?);
    }

    match serde_json::from_str::<ErrorDocument>(&text) {
        Ok(doc) => Err(doc.into()),
        Err(_) => Err(Error::UnexpectedResponse {
            status: status.as_u16(),
            message: text,
        }),
    }
}
