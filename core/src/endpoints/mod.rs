//! Endpoint methods, one module per resource family.
//!
//! Each method fixes the verb, path, query and response shape and delegates
//! to `TlyClient::send` / `send_raw`. Numeric ids go straight into the path.

use serde::Serialize;

mod links;
mod onelink;
mod pixels;
mod qr;
mod stats;
mod tags;
mod utm;

/// `{"short_url": ...}` body used by body-addressed deletes.
#[derive(Serialize)]
struct ShortUrlBody<'a> {
    short_url: &'a str,
}
