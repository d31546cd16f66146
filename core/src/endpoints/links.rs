use super::ShortUrlBody;
use crate::client::{TlyClient, NO_BODY};
use crate::error::Result;
use crate::http::{HttpMethod, Query, Transport};
use crate::types::{
    BulkShortenRequest, BulkUpdateRequest, ExpandRequest, ExpandResponse, ListShortLinksOptions,
    ShortLink, ShortLinkCreateRequest, ShortLinkListResponse, ShortLinkUpdateRequest,
};

const LINK_PATH: &str = "/api/v1/link";
const SHORTEN_PATH: &str = "/api/v1/link/shorten";
const EXPAND_PATH: &str = "/api/v1/link/expand";
const LIST_PATH: &str = "/api/v1/link/list";
const BULK_PATH: &str = "/api/v1/link/bulk";
const BULK_UPDATE_PATH: &str = "/api/v1/link/bulk/update";

impl<T: Transport> TlyClient<T> {
    pub fn create_short_link(&self, request: &ShortLinkCreateRequest) -> Result<ShortLink> {
        self.send(HttpMethod::Post, SHORTEN_PATH, None, Some(request), "short link")
    }

    pub fn get_short_link(&self, short_url: &str) -> Result<ShortLink> {
        let mut query = Query::new();
        query.set("short_url", short_url);
        self.send(HttpMethod::Get, LINK_PATH, Some(&query), NO_BODY, "short link")
    }

    pub fn update_short_link(&self, request: &ShortLinkUpdateRequest) -> Result<ShortLink> {
        self.send(HttpMethod::Put, LINK_PATH, None, Some(request), "short link")
    }

    /// The link is identified in the JSON body, not the path.
    pub fn delete_short_link(&self, short_url: &str) -> Result<()> {
        self.send_raw(
            HttpMethod::Delete,
            LINK_PATH,
            None,
            Some(&ShortUrlBody { short_url }),
        )?;
        Ok(())
    }

    pub fn expand_short_link(&self, request: &ExpandRequest) -> Result<ExpandResponse> {
        self.send(HttpMethod::Post, EXPAND_PATH, None, Some(request), "expand")
    }

    /// List links with caller-built query parameters; returns the payload bytes as served.
    pub fn list_short_links(&self, query: &Query) -> Result<Vec<u8>> {
        self.send_raw(HttpMethod::Get, LIST_PATH, Some(query), NO_BODY)
    }

    /// List one page of links with typed filters.
    pub fn list_short_links_detailed(
        &self,
        options: &ListShortLinksOptions,
    ) -> Result<ShortLinkListResponse> {
        let mut query = Query::new();
        query
            .set_if_present("search", options.search.as_deref())
            .push_indexed("tag_ids", &options.tag_ids)
            .push_indexed("pixel_ids", &options.pixel_ids)
            .set_if_present("start_date", options.start_date.as_deref())
            .set_if_present("end_date", options.end_date.as_deref())
            .push_indexed("domains", &options.domains)
            .set_positive("page", options.page.map_or(0, i64::from));
        self.send(HttpMethod::Get, LIST_PATH, Some(&query), NO_BODY, "short link list")
    }

    /// Shorten many URLs at once; returns the payload bytes as served.
    pub fn bulk_shorten_links(&self, request: &BulkShortenRequest) -> Result<Vec<u8>> {
        self.send_raw(HttpMethod::Post, BULK_PATH, None, Some(request))
    }

    /// Update many links at once; returns the payload bytes as served.
    pub fn bulk_update_links(&self, request: &BulkUpdateRequest) -> Result<Vec<u8>> {
        self.send_raw(HttpMethod::Post, BULK_UPDATE_PATH, None, Some(request))
    }
}
