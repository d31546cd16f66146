//! Blocking, typed client for the T.LY URL shortener REST API.
//!
//! # Overview
//! Every endpoint method builds an `HttpRequest` (method, URL, headers, JSON
//! body), hands it to a `Transport`, and decodes the `HttpResponse` back into
//! a typed value. The default transport is `UreqTransport`; tests swap in a
//! recording fake so request shapes can be asserted without a network.
//!
//! # Design
//! - `TlyClient` holds only immutable configuration (API key, base URL,
//!   transport), so one instance can be shared across threads.
//! - `send_raw` and `send` in `client` are the single dispatch chokepoint;
//!   the endpoint modules are thin instantiations of them.
//! - No retries, no caching, no pagination traversal. Every error goes back
//!   to the caller.
//!
//! ```no_run
//! use tly_client::{ShortLinkCreateRequest, TlyClient};
//!
//! let client = TlyClient::new("my-api-token");
//! let link = client.create_short_link(&ShortLinkCreateRequest {
//!     long_url: "https://example.com".to_string(),
//!     domain: "https://t.ly/".to_string(),
//!     ..Default::default()
//! })?;
//! println!("{}", link.short_url);
//! # Ok::<(), tly_client::ClientError>(())
//! ```

pub mod client;
pub mod endpoints;
pub mod error;
pub mod http;
mod serde_utils;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{TlyClient, DEFAULT_BASE_URL};
pub use error::{ClientError, Result, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Query, Transport, UreqTransport};
pub use types::*;
