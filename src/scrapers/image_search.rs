//! The image search scraper.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use super::api::ApiStrategy;
use super::candidate::build_candidate;
use super::html::HtmlScrapeStrategy;
use super::normalize::normalize_entries;
use super::paginate::collect_pages;
use super::redact::redact_url;
use super::settings::{EngineSettings, StrategyKind};
use super::strategy::ResultStrategy;
use super::video::VideoListingStrategy;
use super::{ScrapeContext, ScrapeError};
use crate::cache::{AssetCache, NoCache};
use crate::http_client::HttpClient;
use crate::models::{AssetKind, NormalizedAsset, SearchCandidate};
use crate::notify::{LogNotifier, Notifier};

/// File written into `debug_dump_dir` with the raw entries of the last fetch.
pub const DEBUG_DUMP_FILE: &str = "ImageSearch_retrieve_assets.json";

/// Finds artwork through an image backend and trailers through the video listing.
///
/// The scraper itself is immutable. Rate state lives in the
/// [`ScrapeContext`] each caller passes in, so one scraper can serve
/// several callers as long as each brings its own context.
pub struct ImageSearchScraper {
    settings: EngineSettings,
    image: Box<dyn ResultStrategy>,
    video: VideoListingStrategy,
    api_client: HttpClient,
    html_client: HttpClient,
    cache: Arc<dyn AssetCache>,
    notifier: Arc<dyn Notifier>,
}

impl ImageSearchScraper {
    pub const NAME: &'static str = "ImageSearch";

    pub fn new(settings: EngineSettings) -> Result<Self, ScrapeError> {
        let image: Box<dyn ResultStrategy> = match settings.strategy {
            StrategyKind::Api => Box::new(ApiStrategy::new(
                &settings.search_api_url,
                &settings.api_key,
                &settings.search_engine_id,
            )),
            StrategyKind::Html => Box::new(HtmlScrapeStrategy::new(&settings.html_search_url)),
        };
        let video = VideoListingStrategy::new(
            &settings.video_api_url,
            &settings.api_key,
            settings.video_max_results,
            &settings.playback_url_template,
        );

        let api_client = HttpClient::new(settings.request_timeout, settings.user_agent.as_deref())?;
        let html_client =
            HttpClient::new(settings.request_timeout, settings.html_user_agent.as_deref())?;

        Ok(Self {
            settings,
            image,
            video,
            api_client,
            html_client,
            cache: Arc::new(NoCache),
            notifier: Arc::new(LogNotifier),
        })
    }

    pub fn with_cache(mut self, cache: Arc<dyn AssetCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn supports_search_string(&self) -> bool {
        true
    }

    pub fn supports_assets(&self) -> bool {
        true
    }

    pub fn supports_disk_cache(&self) -> bool {
        true
    }

    pub fn supports_metadata(&self) -> bool {
        false
    }

    /// Whether the image backend has the credentials it needs.
    pub fn is_enabled(&self) -> bool {
        self.image.is_enabled()
    }

    /// Resolve a term to its single candidate. Blank terms have none.
    pub fn search_candidates(
        &self,
        term: &str,
        platform: &str,
    ) -> Result<Vec<SearchCandidate>, ScrapeError> {
        if term.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![build_candidate(
            term,
            platform,
            self.image.as_ref(),
            &self.video,
        )])
    }

    fn strategy_for(&self, kind: AssetKind) -> &dyn ResultStrategy {
        if kind.is_video() {
            &self.video
        } else {
            self.image.as_ref()
        }
    }

    fn client_for(&self, strategy: &dyn ResultStrategy) -> &HttpClient {
        if strategy.wants_browser_agent() {
            &self.html_client
        } else {
            &self.api_client
        }
    }

    /// Fetch and normalize the assets of one kind for a candidate.
    ///
    /// Cached lists are returned without any request. A page that has no
    /// data yields an empty list; hard backend failures are errors.
    pub async fn fetch_assets(
        &self,
        ctx: &mut ScrapeContext,
        candidate: &SearchCandidate,
        kind: AssetKind,
    ) -> Result<Vec<NormalizedAsset>, ScrapeError> {
        let strategy = self.strategy_for(kind);
        if !strategy.is_enabled() {
            debug!(
                "{} strategy has no credentials, skipping {} for '{}'",
                strategy.name(),
                kind,
                candidate.id
            );
            return Ok(Vec::new());
        }

        let key = candidate.cache_key(strategy.name(), kind);
        match self.cache.get(&key).await {
            Ok(Some(assets)) => {
                debug!("Cache hit for {} ({} assets)", key, assets.len());
                return Ok(assets);
            }
            Ok(None) => {}
            Err(e) => warn!("Cache read failed for {}: {}", key, e),
        }

        let template = candidate
            .template(strategy.name())
            .ok_or_else(|| ScrapeError::MissingTemplate(strategy.name().to_string()))?;

        let entries = collect_pages(
            self.client_for(strategy),
            ctx,
            strategy,
            template,
            kind,
            self.notifier.as_ref(),
        )
        .await?;
        self.dump_entries(&entries).await;

        let assets = normalize_entries(strategy, &entries, kind, &candidate.display_name);
        info!(
            "Found {} {} assets for '{}' ({} entries)",
            assets.len(),
            kind,
            candidate.id,
            entries.len()
        );

        if let Err(e) = self.cache.put(&key, &assets).await {
            warn!("Cache write failed for {}: {}", key, e);
        }

        Ok(assets)
    }

    /// The asset URL, and the same URL safe to log.
    pub fn resolve_asset_url(&self, asset: &NormalizedAsset) -> (String, String) {
        (asset.full_url.clone(), redact_url(&asset.full_url))
    }

    /// File extension to store the asset under.
    ///
    /// Trailers are stored as a `url` link file. Other assets use the
    /// lowercase extension of the URL path, or nothing when it has none.
    pub fn resolve_asset_url_extension(&self, asset: &NormalizedAsset) -> String {
        if asset.asset_kind.is_video() {
            return "url".to_string();
        }

        let Ok(url) = url::Url::parse(&asset.full_url) else {
            return String::new();
        };
        let file_name = url.path().rsplit('/').next().unwrap_or_default();
        std::path::Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_default()
    }

    async fn dump_entries(&self, entries: &[Value]) {
        let Some(dir) = &self.settings.debug_dump_dir else {
            return;
        };

        let json = match serde_json::to_string_pretty(entries) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize debug dump: {}", e);
                return;
            }
        };
        if let Err(e) = tokio::fs::create_dir_all(dir).await {
            warn!("Failed to create debug dump dir {}: {}", dir.display(), e);
            return;
        }
        let path = dir.join(DEBUG_DUMP_FILE);
        match tokio::fs::write(&path, json).await {
            Ok(()) => debug!("Wrote {} raw entries to {}", entries.len(), path.display()),
            Err(e) => warn!("Failed to write debug dump {}: {}", path.display(), e),
        }
    }
}
