//! `Transport` implementation that delegates to a JS object.

use std::time::Duration;

use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use webfinger_lookup::{Transport, TransportError, TransportResponse};

#[wasm_bindgen]
extern "C" {
    /// JavaScript transport object.
    pub type JsTransport;

    /// Resolves to `{ status, body }` for any HTTP answer; rejects only
    /// when no answer arrived (network error, timeout).
    #[wasm_bindgen(method, catch)]
    async fn fetch(
        this: &JsTransport,
        url: &str,
        timeout_ms: f64,
        accept: &str,
    ) -> Result<JsValue, JsValue>;
}

#[derive(Deserialize)]
struct FetchResult {
    status: u16,
    #[serde(default)]
    body: String,
}

/// Wraps a JS transport object and implements `Transport`.
pub struct JsFetchTransport {
    inner: JsTransport,
}

// SAFETY: WASM is single-threaded.
unsafe impl Send for JsFetchTransport {}
unsafe impl Sync for JsFetchTransport {}

impl JsFetchTransport {
    pub fn new(transport: JsTransport) -> Self {
        Self { inner: transport }
    }
}

/// Map a rejected `fetch` promise to a `TransportError`.
///
/// `AbortSignal.timeout()` rejects with a `TimeoutError` and a manual abort
/// with an `AbortError`; both mean the deadline passed. Any other rejection
/// means no answer arrived.
fn rejection(reason: JsValue) -> TransportError {
    if let Some(message) = reason.as_string() {
        return TransportError::network(message);
    }
    let Some(error) = reason.dyn_ref::<js_sys::Error>() else {
        return TransportError::network(format!("fetch rejected with {reason:?}"));
    };
    let message = String::from(error.message());
    match String::from(error.name()).as_str() {
        "TimeoutError" | "AbortError" => TransportError::timeout(message),
        _ => TransportError::network(message),
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for JsFetchTransport {
    async fn fetch(
        &self,
        url: &str,
        timeout: Duration,
        accept: &str,
    ) -> Result<TransportResponse, TransportError> {
        let result = self
            .inner
            .fetch(url, timeout.as_millis() as f64, accept)
            .await
            .map_err(rejection)?;

        let FetchResult { status, body } = serde_wasm_bindgen::from_value(result)
            .map_err(|e| TransportError::new(format!("Failed to parse fetch result: {e}")))?;

        Ok(TransportResponse { status, body })
    }
}
