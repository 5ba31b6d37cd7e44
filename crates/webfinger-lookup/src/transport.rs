//! Transport trait: the HTTP layer the resolver issues requests through.

use std::time::Duration;

use async_trait::async_trait;

/// User-provided HTTP transport.
///
/// Implementations perform a single GET and report whatever status the
/// server answered with. Only failures to get an answer at all (DNS,
/// refused connection, timeout) are errors.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait Transport: Send + Sync {
    /// GET `url` with the given `Accept` header, giving up after `timeout`.
    async fn fetch(
        &self,
        url: &str,
        timeout: Duration,
        accept: &str,
    ) -> Result<TransportResponse, TransportError>;
}

/// Status and body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Classification of transport failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// No response within the request timeout
    Timeout,
    /// DNS, connect, or TLS failure
    Network,
    Other,
}

/// Transport-level error (the request produced no HTTP response).
#[derive(Debug, Clone)]
pub struct TransportError {
    pub message: String,
    pub kind: TransportErrorKind,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: TransportErrorKind::Other,
        }
    }

    pub fn with_kind(message: impl Into<String>, kind: TransportErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::with_kind(message, TransportErrorKind::Timeout)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::with_kind(message, TransportErrorKind::Network)
    }
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TransportError {}
