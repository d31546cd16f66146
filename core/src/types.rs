//! Request and response DTOs for the T.LY API.
//!
//! # Design
//! Response records default every missing field so a new or absent attribute
//! never fails a whole call. Fields whose schema the API does not pin down
//! (`meta`, expiry, stats breakdowns) stay as `serde_json::Value`.
//!
//! Request structs skip unset optional fields entirely instead of sending
//! `null`. The API treats a present key as "change this", so partial updates
//! depend on absent keys staying absent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::serde_utils::null_to_default;

/// Pagination envelope returned by list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default, deserialize_with = "null_to_default")]
    pub current_page: u32,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub last_page: u32,
    #[serde(default, deserialize_with = "null_to_default")]
    pub per_page: u32,
    #[serde(default, deserialize_with = "null_to_default")]
    pub total: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            current_page: 0,
            data: Vec::new(),
            last_page: 0,
            per_page: 0,
            total: 0,
        }
    }
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }
}

// ---------------------------------------------------------------------------
// Pixels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pixel {
    #[serde(deserialize_with = "null_to_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_to_default")]
    pub name: String,
    #[serde(deserialize_with = "null_to_default")]
    pub pixel_id: String,
    #[serde(deserialize_with = "null_to_default")]
    pub pixel_type: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelCreateRequest {
    pub name: String,
    pub pixel_id: String,
    pub pixel_type: String,
}

/// Full replacement of a pixel; `id` selects the pixel and is echoed in the body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelUpdateRequest {
    pub id: i64,
    pub name: String,
    pub pixel_id: String,
    pub pixel_type: String,
}

// ---------------------------------------------------------------------------
// Short links
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortLink {
    #[serde(deserialize_with = "null_to_default")]
    pub short_url: String,
    pub description: Option<String>,
    #[serde(deserialize_with = "null_to_default")]
    pub long_url: String,
    #[serde(deserialize_with = "null_to_default")]
    pub domain: String,
    #[serde(deserialize_with = "null_to_default")]
    pub short_id: String,
    /// Remaining view budget; an integer or `null`.
    pub expire_at_views: Value,
    /// Expiry timestamp; a string or `null`.
    pub expire_at_datetime: Value,
    pub public_stats: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub meta: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code_base64: Option<String>,
    #[serde(deserialize_with = "null_to_default", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Value>,
    #[serde(deserialize_with = "null_to_default", skip_serializing_if = "Vec::is_empty")]
    pub pixels: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShortLinkCreateRequest {
    pub long_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_id: Option<String>,
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_at_datetime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_at_views: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_stats: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pixels: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShortLinkUpdateRequest {
    pub short_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_id: Option<String>,
    pub long_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_at_datetime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_at_views: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_stats: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pixels: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandRequest {
    pub short_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpandResponse {
    #[serde(deserialize_with = "null_to_default")]
    pub long_url: String,
    pub expired: bool,
}

/// Filters for `list_short_links_detailed`. Unset and empty filters are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListShortLinksOptions {
    pub search: Option<String>,
    pub tag_ids: Vec<i64>,
    pub pixel_ids: Vec<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub domains: Vec<i64>,
    pub page: Option<u32>,
}

pub type ShortLinkListResponse = Page<ShortLink>;

/// The `links` field of a bulk request: typed entries, or any JSON the API
/// accepts (for instance a plain array of URLs). Both serialize as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BulkLinks<E> {
    Structured(Vec<E>),
    Opaque(Value),
}

impl<E> From<Vec<E>> for BulkLinks<E> {
    fn from(entries: Vec<E>) -> Self {
        BulkLinks::Structured(entries)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkShortenEntry {
    pub long_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backhalf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkShortenRequest {
    pub domain: String,
    pub links: BulkLinks<BulkShortenEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pixels: Vec<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkUpdateEntry {
    pub short_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backhalf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkUpdateRequest {
    pub links: BulkLinks<BulkUpdateEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pixels: Vec<i64>,
}

// ---------------------------------------------------------------------------
// Stats and OneLink
// ---------------------------------------------------------------------------

/// One row of a stats breakdown, e.g. `{"browser": "Chrome", "total": 12}`.
pub type StatsEntry = Map<String, Value>;

/// Click analytics for a short link or a OneLink.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    #[serde(deserialize_with = "null_to_default")]
    pub clicks: u64,
    #[serde(deserialize_with = "null_to_default")]
    pub unique_clicks: u64,
    #[serde(deserialize_with = "null_to_default")]
    pub total_qr_scans: u64,
    #[serde(deserialize_with = "null_to_default")]
    pub browsers: Vec<StatsEntry>,
    #[serde(deserialize_with = "null_to_default")]
    pub countries: Vec<StatsEntry>,
    #[serde(deserialize_with = "null_to_default")]
    pub cities: Vec<StatsEntry>,
    #[serde(deserialize_with = "null_to_default")]
    pub referrers: Vec<StatsEntry>,
    #[serde(deserialize_with = "null_to_default")]
    pub platforms: Vec<StatsEntry>,
    #[serde(deserialize_with = "null_to_default")]
    pub daily_clicks: Vec<StatsEntry>,
    #[serde(deserialize_with = "null_to_default")]
    pub link_clicks: Vec<StatsEntry>,
    #[serde(deserialize_with = "null_to_default")]
    pub data: Map<String, Value>,
}

/// OneLink analytics share the short link stats layout.
pub type OneLinkStats = Stats;

/// Stats query for a short link. Dates are sent as given (`YYYY-MM-DD`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsRequest {
    pub short_url: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

pub type OneLinkStatsRequest = StatsRequest;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OneLink {
    #[serde(deserialize_with = "null_to_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_to_default")]
    pub short_id: String,
    #[serde(deserialize_with = "null_to_default")]
    pub short_url: String,
    #[serde(deserialize_with = "null_to_default")]
    pub domain: String,
    #[serde(deserialize_with = "null_to_default")]
    pub title: String,
    pub description: Option<String>,
    pub avatar_url: Option<String>,
    pub meta: Value,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_clicked: Option<String>,
}

pub type OneLinkListResponse = Page<OneLink>;

// ---------------------------------------------------------------------------
// UTM presets
// ---------------------------------------------------------------------------

/// A saved UTM parameter set.
///
/// `id` and `name` are required so that an envelope such as
/// `{"data": {...}}` is never mistaken for an empty preset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtmPreset {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub source: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub medium: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub campaign: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub term: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtmPresetRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
}

// ---------------------------------------------------------------------------
// QR codes
// ---------------------------------------------------------------------------

/// Query for `get_qr_code`. `output` and `format` are forwarded verbatim
/// (e.g. `output=base64`, `format=png|svg|eps`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QrCodeRequest {
    pub short_url: String,
    pub output: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrCodeUpdateRequest {
    pub short_url: String,
    /// Logo embedded in the center of the code, as a URL or data URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_dots_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dots_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dots_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_style: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrCode {
    #[serde(deserialize_with = "null_to_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_to_default")]
    pub short_url: String,
    #[serde(deserialize_with = "null_to_default")]
    pub qr_code_options: Map<String, Value>,
    pub team_id: Option<i64>,
    pub user_id: Option<i64>,
    pub updated_at: Option<String>,
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    #[serde(deserialize_with = "null_to_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_to_default")]
    pub tag: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}
