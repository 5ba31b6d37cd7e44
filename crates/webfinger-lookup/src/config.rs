use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_TLS_ONLY: bool = true;
const DEFAULT_WEBFIST_FALLBACK: bool = false;
const DEFAULT_URI_FALLBACK: bool = false;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Caller-supplied lookup options. `None` means "use the default".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LookupOptions {
    /// Only ever query over https (default: true)
    pub tls_only: Option<bool>,
    /// Ask webfist.org when the host itself has nothing (default: false)
    pub webfist_fallback: Option<bool>,
    /// Try `host-meta` and `host-meta.json` after `webfinger` (default: false)
    pub uri_fallback: Option<bool>,
    /// Per-request timeout in milliseconds (default: 10000)
    #[serde(rename = "requestTimeout")]
    pub request_timeout_ms: Option<u64>,
}

/// Resolved lookup configuration. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    secure_only: bool,
    secondary_network_fallback: bool,
    endpoint_fallback: bool,
    request_timeout: Duration,
}

impl Config {
    /// Resolve options against the defaults, one field at a time.
    ///
    /// An explicit `Some(false)` is kept as `false`; only `None` falls back.
    pub fn from_options(options: LookupOptions) -> Self {
        Self {
            secure_only: options.tls_only.unwrap_or(DEFAULT_TLS_ONLY),
            secondary_network_fallback: options
                .webfist_fallback
                .unwrap_or(DEFAULT_WEBFIST_FALLBACK),
            endpoint_fallback: options.uri_fallback.unwrap_or(DEFAULT_URI_FALLBACK),
            request_timeout: Duration::from_millis(
                options
                    .request_timeout_ms
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS),
            ),
        }
    }

    pub fn secure_only(&self) -> bool {
        self.secure_only
    }

    pub fn secondary_network_fallback(&self) -> bool {
        self.secondary_network_fallback
    }

    pub fn endpoint_fallback(&self) -> bool {
        self.endpoint_fallback
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_options(LookupOptions::default())
    }
}

impl From<LookupOptions> for Config {
    fn from(options: LookupOptions) -> Self {
        Self::from_options(options)
    }
}
