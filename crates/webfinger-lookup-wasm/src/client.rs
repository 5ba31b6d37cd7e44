//! JS-facing WebFinger client.

use std::sync::Arc;

use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use webfinger_lookup::{Config, LookupOptions, WebFinger};

use crate::error::{js_error, link_error, lookup_error, to_js_value};
use crate::transport::{JsFetchTransport, JsTransport};

#[wasm_bindgen]
pub struct WebFingerClient {
    inner: WebFinger,
}

#[wasm_bindgen]
impl WebFingerClient {
    /// `options` is a JSON object with any of `tlsOnly`, `webfistFallback`,
    /// `uriFallback`, `requestTimeout`; missing keys take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(transport: JsTransport, options: Option<String>) -> Result<WebFingerClient, JsValue> {
        let options: LookupOptions = match options {
            Some(json) => serde_json::from_str(&json).map_err(js_error)?,
            None => LookupOptions::default(),
        };
        let transport = Arc::new(JsFetchTransport::new(transport));
        Ok(Self {
            inner: WebFinger::new(Config::from_options(options), transport),
        })
    }

    /// Resolves to `{ raw, index: { displayName, links } }`.
    pub fn lookup(&self, address: String) -> Promise {
        let inner = self.inner.clone();
        future_to_promise(async move {
            let result = inner.lookup(&address).await.map_err(|e| lookup_error(&e))?;
            to_js_value(&result)
        })
    }

    /// Resolves to the first link in `category`.
    #[wasm_bindgen(js_name = "lookupLink")]
    pub fn lookup_link(&self, address: String, category: String) -> Promise {
        let inner = self.inner.clone();
        future_to_promise(async move {
            let link = inner
                .lookup_link(&address, &category)
                .await
                .map_err(|e| link_error(&e))?;
            to_js_value(&link)
        })
    }
}
