//! In-memory stand-in for the T.LY REST API.
//!
//! Covers the routes the client calls, with the same quirks the real service
//! shows: body-addressed deletes for links and OneLink stats, indexed
//! `tag_ids[i]` list filters, and UTM preset responses that are sometimes
//! wrapped in `{"data": ...}` and sometimes not.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

pub const DEFAULT_API_KEY: &str = "test-token";
const PER_PAGE: usize = 10;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Link {
    pub short_url: String,
    pub short_id: String,
    pub long_url: String,
    pub domain: String,
    pub description: Option<String>,
    pub public_stats: bool,
    pub expire_at_views: Option<u64>,
    pub expire_at_datetime: Option<String>,
    pub password: Option<String>,
    #[serde(default)]
    pub tags: Vec<i64>,
    #[serde(default)]
    pub pixels: Vec<i64>,
    pub meta: Value,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub tag: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pixel {
    pub id: i64,
    pub name: String,
    pub pixel_id: String,
    pub pixel_type: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UtmPreset {
    pub id: i64,
    pub name: String,
    pub source: Option<String>,
    pub medium: Option<String>,
    pub campaign: Option<String>,
    pub content: Option<String>,
    pub term: Option<String>,
}

#[derive(Default)]
struct Store {
    next_id: i64,
    links: BTreeMap<String, Link>,
    tags: BTreeMap<i64, Tag>,
    pixels: BTreeMap<i64, Pixel>,
    presets: BTreeMap<i64, UtmPreset>,
}

impl Store {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Clone)]
struct AppState {
    api_key: Arc<str>,
    store: Arc<RwLock<Store>>,
}

pub fn app() -> Router {
    app_with_key(DEFAULT_API_KEY)
}

pub fn app_with_key(api_key: &str) -> Router {
    let state = AppState {
        api_key: Arc::from(api_key),
        store: Arc::new(RwLock::new(Store::default())),
    };
    Router::new()
        .route("/api/v1/link", get(get_link).put(update_link).delete(delete_link))
        .route("/api/v1/link/shorten", post(create_link))
        .route("/api/v1/link/expand", post(expand_link))
        .route("/api/v1/link/list", get(list_links))
        .route("/api/v1/link/bulk", post(bulk_shorten))
        .route("/api/v1/link/bulk/update", post(bulk_update))
        .route("/api/v1/link/stats", get(link_stats))
        .route("/api/v1/link/tag", get(list_tags).post(create_tag))
        .route("/api/v1/link/tag/{id}", get(get_tag).put(update_tag).delete(delete_tag))
        .route("/api/v1/link/pixel", get(list_pixels).post(create_pixel))
        .route(
            "/api/v1/link/pixel/{id}",
            get(get_pixel).put(update_pixel).delete(delete_pixel),
        )
        .route("/api/v1/link/utm-preset", get(list_presets).post(create_preset))
        .route(
            "/api/v1/link/utm-preset/{id}",
            get(get_preset).put(update_preset).delete(delete_preset),
        )
        .route("/api/v1/link/qr-code", get(qr_code).put(update_qr_code))
        .route("/api/v1/onelink/stats", get(onelink_stats))
        .route("/api/v1/onelink/stat", delete(delete_onelink_stats))
        .route("/api/v1/onelink/list", get(list_onelinks))
        .layer(middleware::from_fn_with_state(state.clone(), require_bearer))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with_key(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_key(api_key)).await
}

async fn require_bearer(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let expected = format!("Bearer {}", state.api_key);
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        == Some(expected.as_str());
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "Unauthenticated."}))).into_response();
    }
    next.run(request).await
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"message": "Not Found"}))).into_response()
}

fn unprocessable(message: &str) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({"message": message}))).into_response()
}

/// Values of `key[0]`, `key[1]`, ... parsed as integers, in index order.
fn indexed_ids(params: &HashMap<String, String>, key: &str) -> Vec<i64> {
    (0..)
        .map_while(|index| params.get(&format!("{key}[{index}]")))
        .filter_map(|value| value.parse().ok())
        .collect()
}

fn page_of<T: Serialize>(items: Vec<T>, page: usize) -> Value {
    let total = items.len();
    let last_page = total.div_ceil(PER_PAGE).max(1);
    let data: Vec<T> = items
        .into_iter()
        .skip((page - 1).saturating_mul(PER_PAGE))
        .take(PER_PAGE)
        .collect();
    json!({
        "current_page": page,
        "data": data,
        "last_page": last_page,
        "per_page": PER_PAGE,
        "total": total,
    })
}

fn requested_page(params: &HashMap<String, String>) -> usize {
    params
        .get("page")
        .and_then(|p| p.parse().ok())
        .filter(|p| *p > 0)
        .unwrap_or(1)
}

// ---------------------------------------------------------------------------
// Short links
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct CreateLink {
    long_url: String,
    domain: Option<String>,
    short_id: Option<String>,
    description: Option<String>,
    public_stats: Option<bool>,
    expire_at_views: Option<u64>,
    expire_at_datetime: Option<String>,
    password: Option<String>,
    #[serde(default)]
    tags: Vec<i64>,
    #[serde(default)]
    pixels: Vec<i64>,
    meta: Option<Value>,
}

#[derive(Deserialize)]
struct UpdateLink {
    short_url: String,
    long_url: Option<String>,
    description: Option<String>,
    public_stats: Option<bool>,
    expire_at_views: Option<u64>,
    expire_at_datetime: Option<String>,
    password: Option<String>,
    tags: Option<Vec<i64>>,
    pixels: Option<Vec<i64>>,
    meta: Option<Value>,
}

#[derive(Deserialize)]
struct ShortUrlBody {
    short_url: String,
}

#[derive(Deserialize)]
struct ShortUrlQuery {
    short_url: String,
}

async fn create_link(State(state): State<AppState>, Json(input): Json<CreateLink>) -> Response {
    if input.long_url.is_empty() {
        return unprocessable("The long url field is required.");
    }
    let mut store = state.store.write().await;
    let id = store.allocate_id();
    let domain = input.domain.unwrap_or_else(|| "https://t.ly/".to_string());
    let short_id = input.short_id.unwrap_or_else(|| format!("m{id}"));
    let short_url = format!("{}/{}", domain.trim_end_matches('/'), short_id);
    if store.links.contains_key(&short_url) {
        return unprocessable("The short id has already been taken.");
    }
    let link = Link {
        short_url: short_url.clone(),
        short_id,
        long_url: input.long_url,
        domain,
        description: input.description,
        public_stats: input.public_stats.unwrap_or(false),
        expire_at_views: input.expire_at_views,
        expire_at_datetime: input.expire_at_datetime,
        password: input.password,
        tags: input.tags,
        pixels: input.pixels,
        meta: input.meta.unwrap_or(Value::Null),
    };
    store.links.insert(short_url, link.clone());
    (StatusCode::CREATED, Json(link)).into_response()
}

async fn get_link(State(state): State<AppState>, Query(query): Query<ShortUrlQuery>) -> Response {
    let store = state.store.read().await;
    match store.links.get(&query.short_url) {
        Some(link) => Json(link.clone()).into_response(),
        None => not_found(),
    }
}

async fn update_link(State(state): State<AppState>, Json(input): Json<UpdateLink>) -> Response {
    let mut store = state.store.write().await;
    let Some(link) = store.links.get_mut(&input.short_url) else {
        return not_found();
    };
    if let Some(long_url) = input.long_url {
        link.long_url = long_url;
    }
    if input.description.is_some() {
        link.description = input.description;
    }
    if let Some(public_stats) = input.public_stats {
        link.public_stats = public_stats;
    }
    if input.expire_at_views.is_some() {
        link.expire_at_views = input.expire_at_views;
    }
    if input.expire_at_datetime.is_some() {
        link.expire_at_datetime = input.expire_at_datetime;
    }
    if input.password.is_some() {
        link.password = input.password;
    }
    if let Some(tags) = input.tags {
        link.tags = tags;
    }
    if let Some(pixels) = input.pixels {
        link.pixels = pixels;
    }
    if let Some(meta) = input.meta {
        link.meta = meta;
    }
    Json(link.clone()).into_response()
}

async fn delete_link(State(state): State<AppState>, Json(input): Json<ShortUrlBody>) -> Response {
    let mut store = state.store.write().await;
    match store.links.remove(&input.short_url) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}

#[derive(Deserialize)]
struct ExpandInput {
    short_url: String,
    password: Option<String>,
}

async fn expand_link(State(state): State<AppState>, Json(input): Json<ExpandInput>) -> Response {
    let store = state.store.read().await;
    let Some(link) = store.links.get(&input.short_url) else {
        return not_found();
    };
    if link.password.is_some() && link.password != input.password {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "Invalid password"}))).into_response();
    }
    Json(json!({"long_url": link.long_url, "expired": false})).into_response()
}

async fn list_links(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let search = params.get("search").cloned().unwrap_or_default();
    let tag_ids = indexed_ids(&params, "tag_ids");
    let pixel_ids = indexed_ids(&params, "pixel_ids");

    let store = state.store.read().await;
    let links: Vec<Link> = store
        .links
        .values()
        .filter(|link| search.is_empty() || link.long_url.contains(&search) || link.short_url.contains(&search))
        .filter(|link| tag_ids.iter().all(|id| link.tags.contains(id)))
        .filter(|link| pixel_ids.iter().all(|id| link.pixels.contains(id)))
        .cloned()
        .collect();
    Json(page_of(links, requested_page(&params))).into_response()
}

#[derive(Deserialize)]
struct BulkInput {
    domain: String,
    links: Value,
}

async fn bulk_shorten(Json(input): Json<BulkInput>) -> Response {
    let count = input.links.as_array().map_or(0, Vec::len);
    Json(json!({
        "message": "Bulk shorten job queued",
        "domain": input.domain,
        "count": count,
    }))
    .into_response()
}

#[derive(Deserialize)]
struct BulkUpdateInput {
    links: Value,
}

async fn bulk_update(Json(input): Json<BulkUpdateInput>) -> Response {
    let count = input.links.as_array().map_or(0, Vec::len);
    Json(json!({"message": "Bulk update job queued", "count": count})).into_response()
}

async fn link_stats(State(state): State<AppState>, Query(query): Query<ShortUrlQuery>) -> Response {
    let store = state.store.read().await;
    let Some(link) = store.links.get(&query.short_url) else {
        return not_found();
    };
    Json(json!({
        "clicks": 0,
        "unique_clicks": 0,
        "browsers": [],
        "countries": [],
        "referrers": [],
        "platforms": [],
        "daily_clicks": [],
        "data": {"short_url": link.short_url, "long_url": link.long_url},
    }))
    .into_response()
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct TagInput {
    tag: String,
}

async fn list_tags(State(state): State<AppState>) -> Json<Vec<Tag>> {
    let store = state.store.read().await;
    Json(store.tags.values().cloned().collect())
}

async fn create_tag(State(state): State<AppState>, Json(input): Json<TagInput>) -> Response {
    let mut store = state.store.write().await;
    let tag = Tag {
        id: store.allocate_id(),
        tag: input.tag,
    };
    store.tags.insert(tag.id, tag.clone());
    (StatusCode::CREATED, Json(tag)).into_response()
}

async fn get_tag(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let store = state.store.read().await;
    match store.tags.get(&id) {
        Some(tag) => Json(tag.clone()).into_response(),
        None => not_found(),
    }
}

async fn update_tag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<TagInput>,
) -> Response {
    let mut store = state.store.write().await;
    match store.tags.get_mut(&id) {
        Some(tag) => {
            tag.tag = input.tag;
            Json(tag.clone()).into_response()
        }
        None => not_found(),
    }
}

async fn delete_tag(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let mut store = state.store.write().await;
    match store.tags.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}

// ---------------------------------------------------------------------------
// Pixels
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct PixelInput {
    name: String,
    pixel_id: String,
    pixel_type: String,
}

async fn list_pixels(State(state): State<AppState>) -> Json<Vec<Pixel>> {
    let store = state.store.read().await;
    Json(store.pixels.values().cloned().collect())
}

async fn create_pixel(State(state): State<AppState>, Json(input): Json<PixelInput>) -> Response {
    let mut store = state.store.write().await;
    let pixel = Pixel {
        id: store.allocate_id(),
        name: input.name,
        pixel_id: input.pixel_id,
        pixel_type: input.pixel_type,
    };
    store.pixels.insert(pixel.id, pixel.clone());
    (StatusCode::CREATED, Json(pixel)).into_response()
}

async fn get_pixel(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let store = state.store.read().await;
    match store.pixels.get(&id) {
        Some(pixel) => Json(pixel.clone()).into_response(),
        None => not_found(),
    }
}

async fn update_pixel(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<PixelInput>,
) -> Response {
    let mut store = state.store.write().await;
    match store.pixels.get_mut(&id) {
        Some(pixel) => {
            pixel.name = input.name;
            pixel.pixel_id = input.pixel_id;
            pixel.pixel_type = input.pixel_type;
            Json(pixel.clone()).into_response()
        }
        None => not_found(),
    }
}

async fn delete_pixel(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let mut store = state.store.write().await;
    match store.pixels.remove(&id) {
        Some(_) => Json(json!({"message": "Pixel deleted"})).into_response(),
        None => not_found(),
    }
}

// ---------------------------------------------------------------------------
// UTM presets: create and list answer wrapped, get and update answer bare.
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct PresetInput {
    name: String,
    source: Option<String>,
    medium: Option<String>,
    campaign: Option<String>,
    content: Option<String>,
    term: Option<String>,
}

impl PresetInput {
    fn into_preset(self, id: i64) -> UtmPreset {
        UtmPreset {
            id,
            name: self.name,
            source: self.source,
            medium: self.medium,
            campaign: self.campaign,
            content: self.content,
            term: self.term,
        }
    }
}

async fn list_presets(State(state): State<AppState>) -> Json<Value> {
    let store = state.store.read().await;
    let presets: Vec<UtmPreset> = store.presets.values().cloned().collect();
    Json(json!({ "data": presets }))
}

async fn create_preset(State(state): State<AppState>, Json(input): Json<PresetInput>) -> Response {
    let mut store = state.store.write().await;
    let preset = input.into_preset(store.allocate_id());
    store.presets.insert(preset.id, preset.clone());
    (StatusCode::CREATED, Json(json!({ "data": preset }))).into_response()
}

async fn get_preset(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let store = state.store.read().await;
    match store.presets.get(&id) {
        Some(preset) => Json(preset.clone()).into_response(),
        None => not_found(),
    }
}

async fn update_preset(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<PresetInput>,
) -> Response {
    let mut store = state.store.write().await;
    if !store.presets.contains_key(&id) {
        return not_found();
    }
    let preset = input.into_preset(id);
    store.presets.insert(id, preset.clone());
    Json(preset).into_response()
}

async fn delete_preset(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let mut store = state.store.write().await;
    match store.presets.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}

// ---------------------------------------------------------------------------
// QR codes and OneLinks
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct QrQuery {
    short_url: String,
    format: Option<String>,
}

async fn qr_code(State(state): State<AppState>, Query(query): Query<QrQuery>) -> Response {
    let known = state.store.read().await.links.contains_key(&query.short_url);
    if !known {
        return not_found();
    }
    match query.format.as_deref() {
        Some("svg") => (
            [(header::CONTENT_TYPE, "image/svg+xml")],
            format!(r#"<svg xmlns="http://www.w3.org/2000/svg"><title>{}</title></svg>"#, query.short_url),
        )
            .into_response(),
        Some("eps") => (
            [(header::CONTENT_TYPE, "application/postscript")],
            "%!PS-Adobe-3.0 EPSF-3.0\n%%BoundingBox: 0 0 100 100\n",
        )
            .into_response(),
        _ => (
            [(header::CONTENT_TYPE, "image/png")],
            vec![0x89u8, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'],
        )
            .into_response(),
    }
}

#[derive(Deserialize)]
struct QrUpdateInput {
    short_url: String,
    #[serde(flatten)]
    options: serde_json::Map<String, Value>,
}

async fn update_qr_code(State(state): State<AppState>, Json(input): Json<QrUpdateInput>) -> Response {
    let known = state.store.read().await.links.contains_key(&input.short_url);
    if !known {
        return not_found();
    }
    Json(json!({
        "id": 1,
        "short_url": input.short_url,
        "qr_code_options": input.options,
        "team_id": null,
        "user_id": 1,
    }))
    .into_response()
}

// OneLinks are never created here, so stats are always empty.
async fn onelink_stats(Query(query): Query<ShortUrlQuery>) -> Json<Value> {
    Json(json!({
        "clicks": 0,
        "unique_clicks": 0,
        "total_qr_scans": 0,
        "link_clicks": [],
        "data": {"short_url": query.short_url},
    }))
}

async fn delete_onelink_stats(Json(_input): Json<ShortUrlBody>) -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn list_onelinks(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    Json(page_of(Vec::<Value>::new(), requested_page(&params)))
}
