//! Lookup resolution: URL construction and the fallback state machine.
//!
//! A lookup starts at `https://{host}/.well-known/webfinger`. When a request
//! fails, [`Session::fallback`] picks the next move in priority order:
//!
//! 1. next well-known endpoint (`host-meta`, then `host-meta.json`)
//! 2. same host over plain http
//! 3. webfist.org, which points at a JRD hosted elsewhere
//!
//! and the lookup gives up with the last error once none applies.

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde_json::Value;

use crate::config::Config;
use crate::error::{JrdError, LookupError, LookupLinkError};
use crate::index::index;
use crate::relations::{Category, UnknownCategory};
use crate::transport::Transport;
use crate::types::{parse_jrd, IndexedJrd, Jrd, Link};
use crate::{ACCEPT_JRD, ENDPOINTS, SECONDARY_NETWORK_HOST};

static LOCALHOST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^localhost(\.localdomain)?(:[0-9]+)?$").expect("localhost pattern is valid")
});

/// Whether `host` is a loopback name that is always queried over plain http.
pub fn is_localhost(host: &str) -> bool {
    LOCALHOST.is_match(host)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Https,
    Http,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Https => "https",
            Protocol::Http => "http",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `user@host` address with whitespace removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    value: String,
    split: usize,
}

impl Address {
    /// # Errors
    /// `InvalidAddress` unless the address has exactly one `@` with
    /// something on both sides of it. The host goes into a URL unescaped,
    /// so it may not contain `/`, `?` or `#`.
    pub fn parse(address: &str) -> Result<Self, LookupError> {
        let value: String = address.chars().filter(|c| !c.is_whitespace()).collect();
        let invalid = || LookupError::InvalidAddress {
            address: address.to_string(),
        };

        let split = value.find('@').ok_or_else(invalid)?;
        let (local, host) = (&value[..split], &value[split + 1..]);
        if local.is_empty() || host.is_empty() || host.contains(['@', '/', '?', '#']) {
            return Err(invalid());
        }

        Ok(Self { value, split })
    }

    pub fn local_part(&self) -> &str {
        &self.value[..self.split]
    }

    pub fn host(&self) -> &str {
        &self.value[self.split + 1..]
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// A move the resolver can make after a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Same host and protocol, next well-known endpoint
    NextEndpoint,
    /// Same host over plain http, back at the first endpoint
    Insecure,
    /// Ask the secondary network over plain http
    SecondaryNetwork,
}

/// State of a single lookup. Created per call and dropped when it ends.
#[derive(Debug, Clone)]
pub struct Session {
    address: Address,
    host: String,
    protocol: Protocol,
    endpoint_index: usize,
    attempted: Vec<String>,
}

impl Session {
    pub fn new(address: Address) -> Self {
        let host = address.host().to_string();
        let protocol = if is_localhost(&host) {
            Protocol::Http
        } else {
            Protocol::Https
        };
        Self {
            address,
            host,
            protocol,
            endpoint_index: 0,
            attempted: Vec::new(),
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn endpoint_index(&self) -> usize {
        self.endpoint_index
    }

    /// URLs requested so far, in order.
    pub fn attempted(&self) -> &[String] {
        &self.attempted
    }

    /// Candidate URL for the current host, protocol, and endpoint.
    pub fn url(&self) -> String {
        format!(
            "{}://{}/.well-known/{}?resource=acct:{}",
            self.protocol, self.host, ENDPOINTS[self.endpoint_index], self.address
        )
    }

    fn on_secondary_network(&self) -> bool {
        self.host == SECONDARY_NETWORK_HOST
    }

    /// The next move after a failure, or `None` to give up.
    pub fn fallback(&self, config: &Config) -> Option<Fallback> {
        if config.endpoint_fallback()
            && !self.on_secondary_network()
            && self.endpoint_index + 1 < ENDPOINTS.len()
        {
            Some(Fallback::NextEndpoint)
        } else if !config.secure_only() && self.protocol == Protocol::Https {
            Some(Fallback::Insecure)
        } else if config.secondary_network_fallback() && !self.on_secondary_network() {
            Some(Fallback::SecondaryNetwork)
        } else {
            None
        }
    }

    pub fn advance(&mut self, fallback: Fallback) {
        match fallback {
            Fallback::NextEndpoint => self.endpoint_index += 1,
            Fallback::Insecure => {
                self.endpoint_index = 0;
                self.protocol = Protocol::Http;
            }
            Fallback::SecondaryNetwork => {
                self.endpoint_index = 0;
                self.protocol = Protocol::Http;
                self.host = SECONDARY_NETWORK_HOST.to_string();
            }
        }
    }

    fn record(&mut self, url: &str) {
        self.attempted.push(url.to_string());
    }
}

/// WebFinger client.
///
/// Lookups share nothing but the configuration and the transport, so one
/// client can serve any number of concurrent lookups.
#[derive(Clone)]
pub struct WebFinger {
    config: Config,
    transport: Arc<dyn Transport>,
}

impl WebFinger {
    pub fn new(config: Config, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolve `address` into an indexed JRD.
    ///
    /// Requests are issued one at a time, so the worst case is the sum of
    /// every attempted request's timeout. Nothing is sent until the returned
    /// future is first polled.
    ///
    /// # Errors
    /// `InvalidAddress` without touching the network; otherwise the error
    /// of the last request once every applicable fallback has been tried.
    pub async fn lookup(&self, address: &str) -> Result<IndexedJrd, LookupError> {
        let mut session = Session::new(Address::parse(address)?);

        loop {
            let url = session.url();
            session.record(&url);

            let err = match self.fetch_jrd(&url).await {
                Ok(jrd) => {
                    tracing::info!(address = %session.address, url = %url, "WebFinger lookup succeeded");
                    return Ok(index(jrd));
                }
                Err(err) => err,
            };

            let Some(step) = session.fallback(&self.config) else {
                tracing::warn!(
                    address = %session.address,
                    attempts = session.attempted.len(),
                    error = %err,
                    "WebFinger lookup failed"
                );
                return Err(err);
            };

            tracing::info!(address = %session.address, ?step, error = %err, "falling back");
            session.advance(step);

            if step == Fallback::SecondaryNetwork {
                return self.secondary_network(&mut session).await;
            }
        }
    }

    /// First link under `category` for `address`.
    ///
    /// # Errors
    /// `UnsupportedCategory` without touching the network, `NoLinksFound`
    /// if the JRD has nothing in that category, or the lookup's own error.
    pub async fn lookup_link(&self, address: &str, category: &str) -> Result<Link, LookupLinkError> {
        let category: Category = category
            .parse()
            .map_err(|UnknownCategory(category)| LookupLinkError::UnsupportedCategory { category })?;

        let result = self.lookup(address).await?;

        result
            .links(category)
            .first()
            .cloned()
            .ok_or_else(|| LookupLinkError::NoLinksFound {
                category: category.to_string(),
            })
    }

    /// Ask the secondary network where the JRD lives, then fetch it from there.
    async fn secondary_network(&self, session: &mut Session) -> Result<IndexedJrd, LookupError> {
        let url = session.url();
        session.record(&url);

        // An `href` that is not a string never makes it into `Link::href`.
        let pointer = index(self.fetch_jrd(&url).await?);
        let href = pointer
            .links(Category::Webfist)
            .first()
            .and_then(|link| link.href.clone())
            .ok_or_else(|| {
                tracing::debug!(url = %url, "WebFist pointer has no string href");
                LookupError::SecondaryNetworkMalformedResponse { url: url.clone() }
            })?;

        tracing::debug!(address = %session.address, href = %href, "following WebFist link");
        session.record(&href);

        let jrd = self.fetch_jrd(&href).await?;
        tracing::info!(address = %session.address, url = %href, "WebFinger lookup succeeded via WebFist");
        Ok(index(jrd))
    }

    async fn fetch_jrd(&self, url: &str) -> Result<Jrd, LookupError> {
        tracing::debug!(url, "requesting JRD");

        let response = self
            .transport
            .fetch(url, self.config.request_timeout(), ACCEPT_JRD)
            .await
            .map_err(|e| {
                tracing::debug!(url, kind = ?e.kind, error = %e, "transport error");
                LookupError::RequestFailed {
                    url: url.to_string(),
                    status: None,
                    reason: e.to_string(),
                }
            })?;

        match response.status {
            200 => serde_json::from_str::<Value>(&response.body)
                .map_err(JrdError::from)
                .and_then(|value| parse_jrd(&value))
                .map_err(|e| LookupError::InvalidResponse {
                    url: url.to_string(),
                    status: 200,
                    reason: e.to_string(),
                }),
            404 => Err(LookupError::EndpointUnreachable {
                url: url.to_string(),
                status: 404,
            }),
            status => Err(LookupError::RequestFailed {
                url: url.to_string(),
                status: Some(status),
                reason: "unexpected status".to_string(),
            }),
        }
    }
}
