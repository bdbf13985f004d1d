//! artsearch - game artwork and trailer search.
//!
//! Resolves a game title to a search candidate and fetches normalized
//! artwork, screenshots and trailers from image and video search backends.

pub mod cache;
pub mod config;
pub mod http_client;
pub mod models;
pub mod notify;
pub mod rate_limit;
pub mod scrapers;

pub use cache::{AssetCache, CacheError, DiskAssetCache, MemoryAssetCache, NoCache};
pub use config::{Config, ConfigError};
pub use models::{AssetKind, AssetQuery, NormalizedAsset, SearchCandidate};
pub use notify::{LogNotifier, Notifier, RecordingNotifier};
pub use rate_limit::{RateLimitConfig, RateLimiter};
pub use scrapers::{
    EngineSettings, EntryError, ImageSearchScraper, ScrapeContext, ScrapeError, StrategyKind,
};
