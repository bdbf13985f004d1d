//! Configuration file and environment handling.
//!
//! Config files may be TOML, YAML or JSON (picked by extension). Environment
//! variables override what the file says.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::rate_limit::{
    RateLimitConfig, DEFAULT_MAX_QUOTA_RETRIES, DEFAULT_MIN_INTERVAL, DEFAULT_QUOTA_COOLDOWN,
};
use crate::scrapers::{
    EngineSettings, StrategyKind, DEFAULT_HTML_SEARCH_URL, DEFAULT_PLAYBACK_URL_TEMPLATE,
    DEFAULT_REQUEST_TIMEOUT, DEFAULT_SEARCH_API_URL, DEFAULT_VIDEO_API_URL,
    DEFAULT_VIDEO_MAX_RESULTS,
};

/// Name prefer discovers config files under (`artsearch.toml`, `artsearch.yaml`, ...).
pub const CONFIG_NAME: &str = "artsearch";

pub const ENV_API_KEY: &str = "ARTSEARCH_API_KEY";
pub const ENV_SEARCH_ENGINE_ID: &str = "ARTSEARCH_SEARCH_ENGINE_ID";
pub const ENV_CACHE_DIR: &str = "ARTSEARCH_CACHE_DIR";
pub const ENV_STRATEGY: &str = "ARTSEARCH_STRATEGY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Search backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub api_key: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub search_engine_id: String,
    pub strategy: StrategyKind,
    pub search_api_url: String,
    pub video_api_url: String,
    pub html_search_url: String,
    pub video_max_results: u32,
    /// Playback URL for trailers, with a `{video_id}` placeholder.
    pub playback_url_template: String,
    /// User agent for API requests: unset, "impersonate", or a literal string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// User agent for the HTML results page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_user_agent: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for SearchConfig {
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
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
        }
    }
}

/// The `[rate_limit]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitSection {
    pub min_interval_ms: u64,
    pub quota_cooldown_secs: u64,
    pub max_quota_retries: u32,
}

impl Default for RateLimitSection {
    fn default() -> Self {
        Self {
            min_interval_ms: DEFAULT_MIN_INTERVAL.as_millis() as u64,
            quota_cooldown_secs: DEFAULT_QUOTA_COOLDOWN.as_secs(),
            max_quota_retries: DEFAULT_MAX_QUOTA_RETRIES,
        }
    }
}

/// The `[cache]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache directory (defaults to the user cache dir).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: None,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub rate_limit: RateLimitSection,
    pub cache: CacheConfig,
    /// Directory for raw result dumps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_dump_dir: Option<String>,
    /// Where this config was loaded from.
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load from an explicit path, else a discovered config file, else
    /// defaults. Environment overrides are applied last.
    pub async fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let discovered = match explicit {
            Some(_) => None,
            None => Self::discover().await,
        };
        let config = Self::load_from_source(explicit.or(discovered.as_deref())).await?;
        Ok(config.with_env_overrides())
    }

    /// Find an artsearch config file in the standard locations, in any
    /// format prefer knows about.
    pub async fn discover() -> Option<PathBuf> {
        match prefer::load(CONFIG_NAME).await {
            Ok(pref_config) => pref_config.source_path().map(|path| path.to_path_buf()),
            Err(_) => None,
        }
    }

    /// Load a config file when there is one, defaults otherwise.
    pub async fn load_from_source(source: Option<&Path>) -> Result<Self, ConfigError> {
        match source {
            Some(path) => Self::load_from_path(path).await,
            None => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load config from a file, picking the format by extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");
        let mut config = Self::parse(&contents, ext)?;
        config.source_path = Some(path.to_path_buf());
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse config text in the format named by `ext`.
    pub fn parse(contents: &str, ext: &str) -> Result<Self, ConfigError> {
        Ok(match ext {
            "yaml" | "yml" => serde_yaml::from_str(contents)?,
            "json" => serde_json::from_str(contents)?,
            _ => toml::from_str(contents)?,
        })
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    /// Apply overrides from any variable lookup.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = lookup(ENV_API_KEY) {
            self.search.api_key = key;
        }
        if let Some(id) = lookup(ENV_SEARCH_ENGINE_ID) {
            self.search.search_engine_id = id;
        }
        if let Some(dir) = lookup(ENV_CACHE_DIR) {
            self.cache.dir = Some(dir);
        }
        if let Some(value) = lookup(ENV_STRATEGY) {
            match value.parse::<StrategyKind>() {
                Ok(strategy) => self.search.strategy = strategy,
                Err(e) => warn!("Ignoring {}: {}", ENV_STRATEGY, e),
            }
        }
        self
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            api_key: self.search.api_key.trim().to_string(),
            search_engine_id: self.search.search_engine_id.trim().to_string(),
            strategy: self.search.strategy,
            search_api_url: self.search.search_api_url.clone(),
            video_api_url: self.search.video_api_url.clone(),
            html_search_url: self.search.html_search_url.clone(),
            video_max_results: self.search.video_max_results,
            playback_url_template: self.search.playback_url_template.clone(),
            user_agent: self.search.user_agent.clone(),
            html_user_agent: self.search.html_user_agent.clone(),
            request_timeout: Duration::from_secs(self.search.request_timeout_secs),
            debug_dump_dir: self.debug_dump_dir.as_deref().map(expand_path),
        }
    }

    pub fn rate_limit_config(&self) -> RateLimitConfig {
        RateLimitConfig {
            min_interval: Duration::from_millis(self.rate_limit.min_interval_ms),
            quota_cooldown: Duration::from_secs(self.rate_limit.quota_cooldown_secs),
            max_quota_retries: self.rate_limit.max_quota_retries,
        }
    }

    /// Directory for the disk asset cache.
    pub fn cache_dir(&self) -> PathBuf {
        match &self.cache.dir {
            Some(dir) => expand_path(dir),
            None => dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("artsearch"),
        }
    }
}

/// Expand `~` in a configured path.
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}
