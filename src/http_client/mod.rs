//! HTTP client used for every outbound search request.

mod response;
mod user_agent;

pub use response::HttpResponse;
pub use user_agent::{resolve_user_agent, IMPERSONATE_USER_AGENTS, USER_AGENT};

use std::time::{Duration, Instant};

use reqwest::Client;
use tracing::debug;

use crate::scrapers::redact_url;

/// Thin wrapper over reqwest that records timing.
///
/// Rate limiting is not done here: the scraper gates every call through the
/// limiter held in its [`ScrapeContext`](crate::scrapers::ScrapeContext).
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client.
    /// - None: default artsearch user agent
    /// - Some("impersonate"): random real browser user agent
    /// - Some(custom): custom user agent string
    pub fn new(timeout: Duration, user_agent_config: Option<&str>) -> Result<Self, reqwest::Error> {
        let user_agent = resolve_user_agent(user_agent_config);
        let client = Client::builder()
            .user_agent(&user_agent)
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()?;
        debug!("HTTP client user agent: {}", user_agent);

        Ok(Self { client })
    }

    /// Make a GET request.
    pub async fn get(&self, url: &str) -> Result<HttpResponse, reqwest::Error> {
        let start = Instant::now();
        let response = self.client.get(url).send().await?;
        let duration = start.elapsed();

        debug!(
            "GET {} -> {} in {}ms",
            redact_url(url),
            response.status().as_u16(),
            duration.as_millis()
        );

        Ok(HttpResponse {
            status: response.status(),
            response,
        })
    }
}
