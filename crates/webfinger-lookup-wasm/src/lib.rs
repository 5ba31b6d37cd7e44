//! WASM bindings for webfinger-lookup.
//!
//! Exposes `WebFingerClient` to browser code. HTTP goes through a JS
//! object with an async `fetch(url, timeoutMs, accept)` method, so the
//! host page decides how requests are made.

#![cfg(target_arch = "wasm32")]

mod client;
mod error;
mod transport;

pub use client::WebFingerClient;
pub use transport::{JsFetchTransport, JsTransport};
