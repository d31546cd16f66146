//! Error types for the T.LY API client.
//!
//! # Design
//! Four failure classes are kept apart because callers react to them
//! differently: the request never left (`Serialization`), it never completed
//! (`Transport`), the service said no (`Api`), or the service answered with a
//! shape the client does not understand (`Decode`). `Api` keeps the raw status
//! and body untouched; there is no parsed error schema.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Failure reported by a `Transport` implementation: DNS, connect, TLS,
/// timeout, or an I/O error while reading the body.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct TransportError {
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl TransportError {
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

/// Errors returned by `TlyClient` operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or the response could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The request payload could not be serialized to JSON. No request was sent.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The server answered with a status outside 200-299.
    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    /// A 2xx response body did not match the expected shape.
    #[error("unable to decode {expected} response: {source}")]
    Decode {
        expected: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// HTTP status of an `Api` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_api_error(&self) -> bool {
        matches!(self, ClientError::Api { .. })
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
