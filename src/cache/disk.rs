//! JSON files on disk, one per cache key.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use super::{AssetCache, CacheError};
use crate::models::NormalizedAsset;

#[derive(Debug, Serialize, Deserialize)]
struct CachedAssets {
    key: String,
    cached_at: DateTime<Utc>,
    assets: Vec<NormalizedAsset>,
}

/// Stores each key as `<sha256(key)>.json` under a directory. Entries never expire.
#[derive(Debug, Clone)]
pub struct DiskAssetCache {
    dir: PathBuf,
}

impl DiskAssetCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let digest = Sha256::digest(key.as_bytes());
        self.dir.join(format!("{}.json", hex::encode(digest)))
    }
}

#[async_trait]
impl AssetCache for DiskAssetCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<NormalizedAsset>>, CacheError> {
        let path = self.path_for(key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let cached: CachedAssets = serde_json::from_slice(&bytes)?;
        if cached.key != key {
            debug!("Cache file {} belongs to another key", path.display());
            return Ok(None);
        }
        Ok(Some(cached.assets))
    }

    async fn put(&self, key: &str, assets: &[NormalizedAsset]) -> Result<(), CacheError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let cached = CachedAssets {
            key: key.to_string(),
            cached_at: Utc::now(),
            assets: assets.to_vec(),
        };
        let path = self.path_for(key);
        tokio::fs::write(&path, serde_json::to_vec_pretty(&cached)?).await?;
        debug!("Cached {} assets for {} at {}", assets.len(), key, path.display());
        Ok(())
    }
}
