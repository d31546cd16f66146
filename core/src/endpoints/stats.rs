use crate::client::{TlyClient, NO_BODY};
use crate::error::Result;
use crate::http::{HttpMethod, Query, Transport};
use crate::types::{Stats, StatsRequest};

const STATS_PATH: &str = "/api/v1/link/stats";

/// `short_url` always, dates only when given.
pub(super) fn stats_query(request: &StatsRequest) -> Query {
    let mut query = Query::new();
    query
        .set("short_url", request.short_url.as_str())
        .set_if_present("start_date", request.start_date.as_deref())
        .set_if_present("end_date", request.end_date.as_deref());
    query
}

impl<T: Transport> TlyClient<T> {
    /// All-time stats for a short link.
    pub fn get_stats(&self, short_url: &str) -> Result<Stats> {
        self.get_stats_with_range(&StatsRequest {
            short_url: short_url.to_string(),
            ..Default::default()
        })
    }

    pub fn get_stats_with_range(&self, request: &StatsRequest) -> Result<Stats> {
        let query = stats_query(request);
        self.send(HttpMethod::Get, STATS_PATH, Some(&query), NO_BODY, "stats")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{client, respond};

    #[test]
    fn get_stats_sends_only_short_url() {
        let c = client();
        c.transport().push(respond(
            200,
            r#"{"clicks":3,"unique_clicks":2,"browsers":[{"browser":"Firefox","total":3}],"countries":[],"referrers":[],"platforms":[],"daily_clicks":[{"day":"2024-05-01","total":3}],"data":{}}"#,
        ));
        let stats = c.get_stats("https://t.ly/abc").unwrap();
        assert_eq!(stats.clicks, 3);
        assert_eq!(stats.daily_clicks.len(), 1);

        let req = c.transport().last_request();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.url,
            "http://localhost:3000/api/v1/link/stats?short_url=https%3A%2F%2Ft.ly%2Fabc"
        );
    }

    #[test]
    fn date_range_is_appended_when_present() {
        let c = client();
        c.get_stats_with_range(&StatsRequest {
            short_url: "https://t.ly/abc".to_string(),
            start_date: Some("2024-01-01".to_string()),
            end_date: Some("2024-01-31".to_string()),
        })
        .unwrap();
        assert_eq!(
            c.transport().last_request().url,
            "http://localhost:3000/api/v1/link/stats?short_url=https%3A%2F%2Ft.ly%2Fabc\
             &start_date=2024-01-01&end_date=2024-01-31"
        );
    }

    #[test]
    fn empty_stats_body_yields_zero_stats() {
        let c = client();
        let stats = c.get_stats("https://t.ly/abc").unwrap();
        assert_eq!(stats, Stats::default());
    }

    #[test]
    fn null_counters_do_not_fail_the_call() {
        let c = client();
        c.transport().push(respond(
            200,
            r#"{"clicks":3,"unique_clicks":2,"total_qr_scans":null}"#,
        ));
        let stats = c.get_stats("https://t.ly/abc").unwrap();
        assert_eq!(stats.clicks, 3);
        assert_eq!(stats.total_qr_scans, 0);
    }
}
