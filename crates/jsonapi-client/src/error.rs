//! Transport error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Invalid RPC URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] alloy_transport_http::reqwest::Error),

    #[error("RPC error: {0}")]
    Rpc(#[from] alloy_transport::TransportError),

    #[error("{0}")]
    Other(String),
}

impl From<TransportError> for jsonapi_core::Error {
    fn from(err: TransportError) -> Self {
        jsonapi_core::Error::TransportFailure(err.to_string())
    }
}
