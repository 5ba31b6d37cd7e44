//! Failures handed to JS as real `Error` objects.

use std::fmt::Display;

use js_sys::{Error, Reflect};
use serde::Serialize;
use wasm_bindgen::JsValue;
use webfinger_lookup::{LookupError, LookupLinkError};

/// A JS `Error` whose message is `e`.
pub fn js_error(e: impl Display) -> JsValue {
    Error::new(&e.to_string()).into()
}

/// A JS `Error` for a failed lookup. Request failures also carry the
/// `url` they hit and, when there was one, the HTTP `status`.
pub fn lookup_error(e: &LookupError) -> JsValue {
    let error = Error::new(&e.to_string());
    if let Some(url) = e.url() {
        let _ = Reflect::set(&error, &JsValue::from("url"), &JsValue::from(url));
    }
    if let Some(status) = e.status() {
        let _ = Reflect::set(&error, &JsValue::from("status"), &JsValue::from(status));
    }
    error.into()
}

pub fn link_error(e: &LookupLinkError) -> JsValue {
    match e {
        LookupLinkError::Lookup(inner) => lookup_error(inner),
        other => js_error(other),
    }
}

/// Serialize a result as plain JS objects.
///
/// The default serializer turns maps (JRD properties, the category index)
/// into JS `Map`s, on which `idx.links.avatar` is `undefined`.
pub fn to_js_value(value: &impl Serialize) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value.serialize(&serializer).map_err(js_error)
}
