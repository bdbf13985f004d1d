//! Runtime settings for the image search scraper.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_SEARCH_API_URL: &str = "https://customsearch.googleapis.com/customsearch/v1";
pub const DEFAULT_VIDEO_API_URL: &str = "https://youtube.googleapis.com/youtube/v3/search";
pub const DEFAULT_HTML_SEARCH_URL: &str = "https://www.google.com/search";
pub const DEFAULT_PLAYBACK_URL_TEMPLATE: &str =
    "plugin://plugin.video.youtube/play/?video_id={video_id}";
pub const DEFAULT_VIDEO_MAX_RESULTS: u32 = 40;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Which image backend a scraper talks to.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// JSON search API (needs an API key and search engine id)
    #[default]
    Api,
    /// Public results page with an embedded JSON payload
    Html,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Html => "html",
        }
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "api" => Ok(Self::Api),
            "html" => Ok(Self::Html),
            _ => Err(format!(
                "Invalid strategy '{}'. Valid options: api, html",
                s
            )),
        }
    }
}

/// Everything the scraper needs to build URLs and clients.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub api_key: String,
    pub search_engine_id: String,
    pub strategy: StrategyKind,
    pub search_api_url: String,
    pub video_api_url: String,
    pub html_search_url: String,
    pub video_max_results: u32,
    /// Playback URL with a `{video_id}` placeholder.
    pub playback_url_template: String,
    /// User agent for API requests (None = artsearch default).
    pub user_agent: Option<String>,
    /// User agent for the HTML results page.
    pub html_user_agent: Option<String>,
    pub request_timeout: Duration,
    /// Where to dump raw result entries for debugging.
    pub debug_dump_dir: Option<PathBuf>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            search_engine_id: String::new(),
            strategy: StrategyKind::default(),
            search_api_url: DEFAULT_SEARCH_API_URL.to_string(),
            video_api_url: DEFAULT_VIDEO_API_URL.to_string(),
            html_search_url: DEFAULT_HTML_SEARCH_URL.to_string(),
            video_max_results: DEFAULT_VIDEO_MAX_RESULTS,
            playback_url_template: DEFAULT_PLAYBACK_URL_TEMPLATE.to_string(),
            user_agent: None,
            html_user_agent: Some("impersonate".to_string()),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            debug_dump_dir: None,
        }
    }
}
