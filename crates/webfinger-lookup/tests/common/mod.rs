//! Shared test utilities for webfinger-lookup tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use webfinger_lookup::{
    Config, LookupOptions, Transport, TransportError, TransportResponse, WebFinger,
};

/// A request as the transport saw it.
#[derive(Debug, Clone)]
pub struct Request {
    pub url: String,
    pub timeout: Duration,
    pub accept: String,
}

/// Transport answering from a fixed script. Unscripted URLs get a 404.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<HashMap<String, Result<TransportResponse, TransportError>>>,
    requests: Mutex<Vec<Request>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, url: &str, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), Ok(TransportResponse::new(status, body)));
    }

    pub fn respond_json(&self, url: &str, body: serde_json::Value) {
        self.respond(url, 200, &body.to_string());
    }

    pub fn fail(&self, url: &str, error: TransportError) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), Err(error));
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn fetch(
        &self,
        url: &str,
        timeout: Duration,
        accept: &str,
    ) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push(Request {
            url: url.to_string(),
            timeout,
            accept: accept.to_string(),
        });
        self.responses
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_else(|| Ok(TransportResponse::new(404, "not found")))
    }
}

pub fn options(tls_only: bool, webfist: bool, uri: bool) -> LookupOptions {
    LookupOptions {
        tls_only: Some(tls_only),
        webfist_fallback: Some(webfist),
        uri_fallback: Some(uri),
        request_timeout_ms: None,
    }
}

pub fn client(options: LookupOptions, transport: &Arc<ScriptedTransport>) -> WebFinger {
    WebFinger::new(Config::from_options(options), transport.clone())
}

/// `{protocol}://{host}/.well-known/{endpoint}?resource=acct:{address}`
pub fn url(protocol: &str, host: &str, endpoint: &str, address: &str) -> String {
    format!("{protocol}://{host}/.well-known/{endpoint}?resource=acct:{address}")
}

/// Route library logs to the test writer; safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
