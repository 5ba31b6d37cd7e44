//! WebFinger (RFC 7033) lookup for `user@host` addresses.
//!
//! This crate resolves an address into a JSON Resource Descriptor (JRD) by
//! querying the host's `.well-known` endpoints, falling back across the
//! legacy host-meta paths, plain http, and the WebFist network when asked to.
//!
//! HTTP is delegated to a [`Transport`]. With the `http` feature (on by
//! default) [`HttpTransport`] provides one built on `reqwest`.

mod config;
mod error;
#[cfg(all(feature = "http", not(target_arch = "wasm32")))]
mod http;
mod index;
mod relations;
mod resolver;
mod transport;
mod types;

pub use config::{Config, LookupOptions};
pub use error::{JrdError, LookupError, LookupLinkError};
#[cfg(all(feature = "http", not(target_arch = "wasm32")))]
pub use http::HttpTransport;
pub use index::index;
pub use relations::{Category, UnknownCategory, NAME_PROPERTY, RELATIONS};
pub use resolver::{is_localhost, Address, Fallback, Protocol, Session, WebFinger};
pub use transport::{Transport, TransportError, TransportErrorKind, TransportResponse};
pub use types::{parse_jrd, IndexedJrd, Jrd, JrdIndex, Link};

/// Well-known resource names, in the order they are tried.
pub const ENDPOINTS: [&str; 3] = ["webfinger", "host-meta", "host-meta.json"];

/// Host queried when the target host has no WebFinger support of its own.
pub const SECONDARY_NETWORK_HOST: &str = "webfist.org";

/// `Accept` header sent with every request.
pub const ACCEPT_JRD: &str = "application/jrd+json, application/json";
