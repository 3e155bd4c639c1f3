//! Error types for the JS-SDK helpers.

use thiserror::Error;

/// Errors returned by the signing helpers and the token/ticket clients.
#[derive(Debug, Error)]
pub enum Error {
    /// A required field was empty. Raised before any I/O.
    #[error("{0} must not be empty")]
    InvalidArgument(&'static str),

    #[error(transparent)]
    Network(#[from] NetworkError),

    /// The client could not be built (bad base URL, bad proxy, TLS setup).
    #[error("invalid client configuration: {0}")]
    Config(String),
}

/// Failures of the single outbound GET made by the clients.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: wreq::Error,
    },

    #[error("{endpoint} returned a non-JSON body (HTTP {status}): {source}")]
    InvalidBody {
        endpoint: &'static str,
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
