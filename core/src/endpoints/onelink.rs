use super::stats::stats_query;
use super::ShortUrlBody;
use crate::client::{TlyClient, NO_BODY};
use crate::error::Result;
use crate::http::{HttpMethod, Query, Transport};
use crate::types::{OneLinkListResponse, OneLinkStats, OneLinkStatsRequest};

const ONELINK_STATS_PATH: &str = "/api/v1/onelink/stats";
const ONELINK_STAT_PATH: &str = "/api/v1/onelink/stat";
const ONELINK_LIST_PATH: &str = "/api/v1/onelink/list";

impl<T: Transport> TlyClient<T> {
    pub fn get_onelink_stats(&self, request: &OneLinkStatsRequest) -> Result<OneLinkStats> {
        let query = stats_query(request);
        self.send(HttpMethod::Get, ONELINK_STATS_PATH, Some(&query), NO_BODY, "OneLink stats")
    }

    /// Clear recorded stats for a OneLink. The URL travels in the JSON body.
    pub fn delete_onelink_stats(&self, short_url: &str) -> Result<()> {
        self.send_raw(
            HttpMethod::Delete,
            ONELINK_STAT_PATH,
            None,
            Some(&ShortUrlBody { short_url }),
        )?;
        Ok(())
    }

    /// One page of OneLinks; `page` of 0 lets the server pick the first page.
    pub fn list_onelinks(&self, page: u32) -> Result<OneLinkListResponse> {
        let mut query = Query::new();
        query.set_positive("page", i64::from(page));
        self.send(HttpMethod::Get, ONELINK_LIST_PATH, Some(&query), NO_BODY, "OneLink list")
    }
}
