//! Errors talking to the Prismic API

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrismicError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No master ref published by {endpoint}")]
    MissingMasterRef { endpoint: String },
}

impl PrismicError {
    /// Whether the CMS could not be reached or answered with a server error
    pub fn is_unavailable(&self) -> bool {
        match self {
            Self::Request { .. } => true,
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
