//! Request dispatch and response decoding for the T.LY API.
//!
//! # Design
//! `TlyClient` holds the API key, base URL and a `Transport`, none of which
//! change after construction except through `&mut self`. Every endpoint goes
//! through `send_raw`: build the URL, serialize the body, attach auth headers,
//! run the transport, classify the status. `send` adds JSON decoding on top,
//! and `decode_enveloped` handles the endpoints that answer with either a
//! bare payload or `{"data": payload}`.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{ClientError, Result};
use crate::http::{HttpMethod, HttpRequest, Query, Transport, UreqTransport};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.t.ly";

/// Placeholder for requests without a JSON body.
pub(crate) const NO_BODY: Option<&()> = None;

/// Blocking client for the T.LY API.
///
/// Cheap to share by reference across threads; it carries no mutable state.
#[derive(Clone)]
pub struct TlyClient<T = UreqTransport> {
    api_key: String,
    base_url: String,
    transport: T,
}

impl TlyClient<UreqTransport> {
    /// Client for the production API using a default `ureq` transport.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            transport: UreqTransport::new(),
        }
    }
}

impl<T> fmt::Debug for TlyClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TlyClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> TlyClient<T> {
    /// Replace the transport, keeping key and base URL.
    pub fn with_transport<U: Transport>(self, transport: U) -> TlyClient<U> {
        TlyClient {
            api_key: self.api_key,
            base_url: self.base_url,
            transport,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.set_base_url(base_url);
        self
    }

    pub fn set_base_url(&mut self, base_url: &str) {
        self.base_url = base_url.trim_end_matches('/').to_string();
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Assemble the `HttpRequest` for a call without sending it.
    ///
    /// `path` includes the `/api/v1` prefix. The query string is appended
    /// only when `query` has pairs.
    pub fn build_request<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        query: Option<&Query>,
        body: Option<&B>,
    ) -> Result<HttpRequest> {
        let mut url = format!("{}{}", self.base_url, path);
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(&query.encode());
        }

        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(ClientError::Serialization)?;

        Ok(HttpRequest {
            method,
            url,
            headers: vec![
                ("Authorization".to_string(), format!("Bearer {}", self.api_key)),
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Accept".to_string(), "application/json".to_string()),
            ],
            body,
        })
    }

    /// Perform one call and return the raw 2xx body.
    ///
    /// Any other status becomes `ClientError::Api` with the body verbatim.
    pub fn send_raw<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        query: Option<&Query>,
        body: Option<&B>,
    ) -> Result<Vec<u8>> {
        let request = self.build_request(method, path, query, body)?;
        debug!(
            method = method.as_str(),
            path,
            query_pairs = query.map_or(0, Query::len),
            has_body = request.body.is_some(),
            "dispatching T.LY request"
        );

        let response = self.transport.execute(request)?;
        debug!(
            method = method.as_str(),
            path,
            status = response.status,
            bytes = response.body.len(),
            "received T.LY response"
        );

        if !response.is_success() {
            return Err(ClientError::Api {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }
        Ok(response.body)
    }

    /// Perform one call and decode the JSON body into `R`.
    ///
    /// An empty or whitespace-only body yields `R::default()`.
    pub fn send<R, B>(
        &self,
        method: HttpMethod,
        path: &str,
        query: Option<&Query>,
        body: Option<&B>,
        expected: &'static str,
    ) -> Result<R>
    where
        R: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        let bytes = self.send_raw(method, path, query, body)?;
        decode_json(&bytes, expected)
    }
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}

pub(crate) fn decode_json<R>(bytes: &[u8], expected: &'static str) -> Result<R>
where
    R: DeserializeOwned + Default,
{
    if is_blank(bytes) {
        return Ok(R::default());
    }
    serde_json::from_slice(bytes).map_err(|source| ClientError::Decode { expected, source })
}

#[derive(Deserialize)]
struct DataEnvelope<R> {
    data: R,
}

/// Decode `bytes` as `R`, falling back to `{"data": R}`.
///
/// Two separate attempts, not a union type: the bare and wrapped shapes
/// share no structure. When both fail the error carries the wrapped
/// attempt's cause.
pub fn decode_enveloped<R: DeserializeOwned>(bytes: &[u8], expected: &'static str) -> Result<R> {
    if let Ok(value) = serde_json::from_slice::<R>(bytes) {
        return Ok(value);
    }
    trace!(expected, "bare decode failed, trying data envelope");
    serde_json::from_slice::<DataEnvelope<R>>(bytes)
        .map(|envelope| envelope.data)
        .map_err(|source| ClientError::Decode { expected, source })
}
