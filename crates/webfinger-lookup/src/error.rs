use thiserror::Error;

/// A JSON document that is not a usable JRD.
#[derive(Debug, Error)]
pub enum JrdError {
    #[error("Invalid JRD: expected object")]
    NotAnObject,

    #[error("invalid json: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("invalid user address {address} (expected format: user@host.com)")]
    InvalidAddress { address: String },

    #[error("endpoint unreachable: {url} (status {status})")]
    EndpointUnreachable { url: String, status: u16 },

    #[error("invalid response from {url} (status {status}): {reason}")]
    InvalidResponse {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("error during request to {url}{}: {reason}", status_suffix(.status))]
    RequestFailed {
        url: String,
        status: Option<u16>,
        reason: String,
    },

    #[error("WebFist response from {url} has no usable webfist link")]
    SecondaryNetworkMalformedResponse { url: String },
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {s})")).unwrap_or_default()
}

impl LookupError {
    /// The URL of the request that failed, if a request was made.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::InvalidAddress { .. } => None,
            Self::EndpointUnreachable { url, .. }
            | Self::InvalidResponse { url, .. }
            | Self::RequestFailed { url, .. }
            | Self::SecondaryNetworkMalformedResponse { url } => Some(url),
        }
    }

    /// The HTTP status observed, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::EndpointUnreachable { status, .. } | Self::InvalidResponse { status, .. } => {
                Some(*status)
            }
            Self::RequestFailed { status, .. } => *status,
            Self::InvalidAddress { .. } | Self::SecondaryNetworkMalformedResponse { .. } => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum LookupLinkError {
    #[error("unsupported rel {category}")]
    UnsupportedCategory { category: String },

    #[error("no links found with rel={category}")]
    NoLinksFound { category: String },

    #[error(transparent)]
    Lookup(#[from] LookupError),
}
