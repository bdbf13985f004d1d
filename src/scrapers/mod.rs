//! Search backends for artwork and trailers.
//!
//! A scrape is a chain of small pieces: a [`ResultStrategy`] renders the
//! query URL, the fetcher classifies one HTTP response into a [`RawPage`],
//! the paginator walks the strategy's offsets, and the normalizer turns
//! entries into [`NormalizedAsset`](crate::models::NormalizedAsset)s.

mod api;
mod candidate;
mod embedded;
mod extract;
mod fetch;
mod html;
mod image_search;
mod normalize;
mod paginate;
mod redact;
mod settings;
mod strategy;
mod video;

pub use api::{ApiStrategy, API_PAGE_OFFSETS};
pub use candidate::build_candidate;
pub use embedded::extract_embedded_json;
pub use extract::extract_path;
pub use fetch::{classify, fetch_page, PageStatus, RawPage};
pub use html::{normalize_thumb_url, HtmlScrapeStrategy};
pub use image_search::{ImageSearchScraper, DEBUG_DUMP_FILE};
pub use normalize::normalize_entries;
pub use paginate::{collect_pages, fetch_with_backoff};
pub use redact::{has_credentials, redact_url, REDACTION_MASK};
pub use settings::{
    EngineSettings, StrategyKind, DEFAULT_HTML_SEARCH_URL, DEFAULT_PLAYBACK_URL_TEMPLATE,
    DEFAULT_REQUEST_TIMEOUT, DEFAULT_SEARCH_API_URL, DEFAULT_VIDEO_API_URL,
    DEFAULT_VIDEO_MAX_RESULTS,
};
pub use strategy::{encode_term, ResultStrategy, SINGLE_PAGE};
pub use video::{VideoListingStrategy, VIDEO_ID_PLACEHOLDER};

use thiserror::Error;

use crate::rate_limit::{RateLimitConfig, RateLimiter};

/// Failures that cross the scraper boundary.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Quota still exceeded after {retries} retries")]
    QuotaExhausted { retries: u32 },

    #[error("Candidate has no query template for strategy '{0}'")]
    MissingTemplate(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl ScrapeError {
    /// HTTP status behind the error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ScrapeError::Http { status, .. } => Some(*status),
            ScrapeError::QuotaExhausted { .. } => Some(429),
            _ => None,
        }
    }
}

/// Why a single result entry was skipped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryError {
    #[error("missing field '{0}'")]
    MissingField(String),

    #[error("field '{0}' is not a string")]
    WrongType(String),

    #[error("not an absolute URL: {0}")]
    RelativeUrl(String),

    #[error("URL carries credentials")]
    CredentialUrl,
}

/// Mutable state for one caller's sequence of scrapes.
#[derive(Debug, Clone, Default)]
pub struct ScrapeContext {
    pub rate: RateLimiter,
}

impl ScrapeContext {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            rate: RateLimiter::with_config(config),
        }
    }
}
