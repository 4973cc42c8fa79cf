//! Error types for request composition and dispatch.
//!
//! # Design
//! Every failure surfaces through a single `Error` enum. Encoding and decoding
//! problems are reported before any I/O happens; `Transport` carries whatever
//! the underlying HTTP client reported and is never retried here.

use thiserror::Error;

/// Errors returned by the codec, `compose`, and `Client::request`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A parameter value could not be converted to its string form.
    #[error("cannot encode parameter `{key}`: {reason}")]
    Encoding { key: String, reason: String },

    /// A query string contained a malformed percent-escape sequence.
    #[error("cannot decode query string: {0}")]
    Decode(String),

    /// The target URL could not be parsed or has no host.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Resolve, connect, send or receive failed at the network layer.
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::InvalidUrl(err.to_string())
    }
}
