//! `reqwest`-backed transport.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;

use crate::config::Config;
use crate::resolver::WebFinger;
use crate::transport::{Transport, TransportError, TransportResponse};

/// HTTP transport over a shared `reqwest::Client`.
///
/// Certificate validation is whatever the client does; this type never
/// looks at TLS itself.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Use a preconfigured client (proxies, custom roots, user agent).
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn transport_err(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::timeout(e.to_string())
    } else if e.is_connect() || e.is_request() {
        TransportError::network(e.to_string())
    } else {
        TransportError::new(e.to_string())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(
        &self,
        url: &str,
        timeout: Duration,
        accept: &str,
    ) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, accept)
            .timeout(timeout)
            .send()
            .await
            .map_err(transport_err)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_err)?;

        Ok(TransportResponse { status, body })
    }
}

impl WebFinger {
    /// Client that talks HTTP through a default [`HttpTransport`].
    pub fn with_http(config: Config) -> Self {
        Self::new(config, Arc::new(HttpTransport::new()))
    }
}
