//! FootyStats REST client.
//!
//! Two endpoints are used:
//! - `todays-matches` lists fixtures for a date, paginated by `pager.max_page`
//! - `match` resolves one fixture by id for grading
//!
//! The API key travels as a query parameter and is never logged. A date's
//! listing is global across competitions, so it is fetched once per client
//! and filtered per call.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use reqwest::Client as HttpClient;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::dto::{MatchDto, MatchResponse, TodaysMatchesResponse};
use super::settings::SourceConfig;
use crate::domain::{CompetitionId, MatchId};
use crate::error::SourceError;
use crate::port::{MatchDataSource, MatchDetail, MatchSummary};

/// Upper bound on pages followed for one date.
const MAX_PAGES: u32 = 50;

/// HTTP client for the FootyStats API.
pub struct FootyStatsClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
    retry_max_attempts: u32,
    retry_backoff_ms: u64,
    /// Successful `todays-matches` listings by date.
    listings: Mutex<HashMap<NaiveDate, Vec<MatchDto>>>,
}

impl FootyStatsClient {
    /// Create a client with default HTTP settings and a single attempt per request.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            retry_max_attempts: 1,
            retry_backoff_ms: 0,
            listings: Mutex::default(),
        }
    }

    #[must_use]
    pub fn from_config(config: &SourceConfig, api_key: impl Into<String>) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            retry_max_attempts: config.retry_max_attempts,
            retry_backoff_ms: config.retry_backoff_ms,
            listings: Mutex::default(),
        }
    }

    /// GET `{base_url}/{endpoint}` with the key and `query` appended.
    ///
    /// Returns `Ok(None)` on HTTP 404.
    async fn get_with_retry<T>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, SourceError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, endpoint);
        let mut attempt = 0;
        let max_attempts = self.retry_max_attempts.max(1);

        loop {
            attempt += 1;
            let response = self
                .http
                .get(&url)
                .query(&[("key", self.api_key.as_str())])
                .query(query)
                .send()
                .await;
            let response = match response {
                Ok(response) => response,
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(Self::redact(err).into());
                    }
                    self.backoff(endpoint, attempt, max_attempts, &err).await;
                    continue;
                }
            };

            if response.status() == StatusCode::NOT_FOUND {
                return Ok(None);
            }
            let response = match response.error_for_status() {
                Ok(response) => response,
                Err(err) => return Err(Self::redact(err).into()),
            };

            match response.json::<T>().await {
                Ok(parsed) => return Ok(Some(parsed)),
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(Self::redact(err).into());
                    }
                    self.backoff(endpoint, attempt, max_attempts, &err).await;
                }
            }
        }
    }

    fn should_retry(err: &reqwest::Error) -> bool {
        err.is_timeout() || err.is_connect()
    }

    /// Strip the URL, which carries the API key, from an error.
    fn redact(err: reqwest::Error) -> reqwest::Error {
        err.without_url()
    }

    async fn backoff(&self, endpoint: &str, attempt: u32, max_attempts: u32, err: &reqwest::Error) {
        warn!(
            endpoint,
            attempt,
            max_attempts,
            error = %Self::describe(err),
            "HTTP request failed, retrying"
        );
        if self.retry_backoff_ms > 0 {
            sleep(Duration::from_millis(self.retry_backoff_ms)).await;
        }
    }

    fn describe(err: &reqwest::Error) -> String {
        if err.is_timeout() {
            "timeout".into()
        } else if err.is_connect() {
            "connect".into()
        } else {
            "request".into()
        }
    }

    /// Every fixture for `date` (UTC), fetched on first use and then reused.
    ///
    /// Failed fetches are not remembered.
    pub async fn todays_matches(&self, date: NaiveDate) -> Result<Vec<MatchDto>, SourceError> {
        if let Some(cached) = self.cached_listing(date) {
            debug!(%date, count = cached.len(), "Reusing fixture listing");
            return Ok(cached);
        }
        let matches = self.fetch_listing(date).await?;
        if let Ok(mut listings) = self.listings.lock() {
            listings.insert(date, matches.clone());
        }
        Ok(matches)
    }

    fn cached_listing(&self, date: NaiveDate) -> Option<Vec<MatchDto>> {
        self.listings.lock().ok()?.get(&date).cloned()
    }

    /// Follow every `todays-matches` page for `date`.
    async fn fetch_listing(&self, date: NaiveDate) -> Result<Vec<MatchDto>, SourceError> {
        let mut matches = Vec::new();
        let mut page = 1;

        loop {
            let query = [
                ("date", date.format("%Y-%m-%d").to_string()),
                ("timezone", "Etc/UTC".to_string()),
                ("page", page.to_string()),
            ];
            let response: TodaysMatchesResponse = self
                .get_with_retry("todays-matches", &query)
                .await?
                .ok_or_else(|| SourceError::Unavailable("todays-matches returned 404".into()))?;

            let max_page = response.pager.map_or(1, |p| p.max_page).min(MAX_PAGES);
            debug!(%date, page, max_page, count = response.data.len(), "Fetched fixture page");
            matches.extend(response.data);

            if page >= max_page {
                break;
            }
            page += 1;
        }

        Ok(matches)
    }
}

#[async_trait]
impl MatchDataSource for FootyStatsClient {
    async fn matches_on_date(
        &self,
        date: NaiveDate,
        competitions: &[CompetitionId],
    ) -> Result<Vec<MatchSummary>, SourceError> {
        let summaries: Vec<MatchSummary> = self
            .todays_matches(date)
            .await?
            .into_iter()
            .filter(|m| competitions.contains(&CompetitionId::new(m.competition_id)))
            .map(MatchDto::into_summary)
            .collect();
        info!(%date, count = summaries.len(), "Fetched fixtures");
        Ok(summaries)
    }

    async fn match_by_id(&self, match_id: &MatchId) -> Result<Option<MatchDetail>, SourceError> {
        let query = [("match_id", match_id.to_string())];
        let response: Option<MatchResponse> = self.get_with_retry("match", &query).await?;
        Ok(response
            .and_then(|r| r.data)
            .map(|dto| dto.to_detail(Utc::now())))
    }

    fn source_name(&self) -> &'static str {
        "FootyStats"
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    use super::*;
    use crate::port::MatchStatus;

    /// Serve `routes` (query substring, status, body) to sequential connections,
    /// returning the base URL.
    fn serve(routes: Vec<(&'static str, u16, &'static str)>, connections: usize) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            for stream in listener.incoming().take(connections) {
                let mut stream = stream.unwrap();
                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let mut request_line = String::new();
                reader.read_line(&mut request_line).unwrap();
                loop {
                    let mut header = String::new();
                    if reader.read_line(&mut header).unwrap() == 0 || header == "\r\n" {
                        break;
                    }
                }
                let (status, body) = routes
                    .iter()
                    .find(|(needle, _, _)| request_line.contains(needle))
                    .map_or((404, "{}"), |(_, status, body)| (*status, *body));
                let response = format!(
                    "HTTP/1.1 {status} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                stream.write_all(response.as_bytes()).unwrap();
            }
        });
        format!("http://{addr}")
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 8).unwrap()
    }

    #[tokio::test]
    async fn test_matches_on_date_follows_pages_and_filters() {
        let base = serve(
            vec![
                (
                    "page=1",
                    200,
                    r#"{"pager":{"current_page":1,"max_page":2},"data":[
                        {"id":1,"competition_id":12325,"home_name":"Basel","away_name":"Servette","date_unix":1741455000,"btts_potential":72,"o25_potential":65}]}"#,
                ),
                (
                    "page=2",
                    200,
                    r#"{"pager":{"current_page":2,"max_page":2},"data":[
                        {"id":2,"competition_id":999,"home_name":"A","away_name":"B","date_unix":1741455000},
                        {"id":3,"competition_id":12325,"home_name":"Lugano","away_name":"Luzern","date_unix":1741462200}]}"#,
                ),
            ],
            2,
        );
        let client = FootyStatsClient::new(base, "secret");
        let matches = client
            .matches_on_date(date(), &[CompetitionId::new(12325)])
            .await
            .unwrap();
        let ids: Vec<_> = matches.iter().map(|m| m.match_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[tokio::test]
    async fn test_listing_is_fetched_once_per_date() {
        // One connection only: a second request would be refused.
        let base = serve(
            vec![(
                "page=1",
                200,
                r#"{"pager":{"current_page":1,"max_page":1},"data":[
                    {"id":1,"competition_id":12325,"home_name":"Basel","away_name":"Servette","date_unix":1741455000},
                    {"id":2,"competition_id":12472,"home_name":"Sturm Graz","away_name":"LASK","date_unix":1741455000}]}"#,
            )],
            1,
        );
        let client = FootyStatsClient::new(base, "secret");
        let swiss = client
            .matches_on_date(date(), &[CompetitionId::new(12325)])
            .await
            .unwrap();
        let austria = client
            .matches_on_date(date(), &[CompetitionId::new(12472)])
            .await
            .unwrap();
        assert_eq!(swiss.len(), 1);
        assert_eq!(austria.len(), 1);
        assert_eq!(austria[0].match_id.as_str(), "2");
    }

    #[tokio::test]
    async fn test_match_by_id_maps_detail() {
        let base = serve(
            vec![(
                "match_id=7412331",
                200,
                r#"{"success":true,"data":{"id":7412331,"status":"complete","date_unix":1741455000,"homeGoalCount":1,"awayGoalCount":1}}"#,
            )],
            1,
        );
        let client = FootyStatsClient::new(base, "secret");
        let detail = client
            .match_by_id(&MatchId::from("7412331"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(detail.status, MatchStatus::Complete);
        assert_eq!(detail.home_goals, Some(1));
    }

    #[tokio::test]
    async fn test_match_by_id_not_found() {
        let base = serve(vec![], 1);
        let client = FootyStatsClient::new(base, "secret");
        let detail = client.match_by_id(&MatchId::from("1")).await.unwrap();
        assert!(detail.is_none());
    }

    #[tokio::test]
    async fn test_server_error_is_unavailable_without_key() {
        let base = serve(vec![("match_id", 500, "{}")], 1);
        let client = FootyStatsClient::new(base, "secret");
        let err = client.match_by_id(&MatchId::from("1")).await.unwrap_err();
        assert!(matches!(err, SourceError::Unavailable(_)));
        assert!(!err.to_string().contains("secret"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_unavailable() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let client = FootyStatsClient::new(format!("http://{addr}"), "secret");
        let err = client
            .matches_on_date(date(), &[CompetitionId::new(1)])
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Unavailable(_)));
    }
}
