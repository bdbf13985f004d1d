//! Asset caches keyed by `<platform>_<term>_<strategy>_<kind>`.

mod disk;

pub use disk::DiskAssetCache;

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::models::NormalizedAsset;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache entry is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Storage for asset lists. Empty lists are valid entries.
#[async_trait]
pub trait AssetCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<NormalizedAsset>>, CacheError>;

    async fn put(&self, key: &str, assets: &[NormalizedAsset]) -> Result<(), CacheError>;
}

/// Cache that never stores anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

#[async_trait]
impl AssetCache for NoCache {
    async fn get(&self, _key: &str) -> Result<Option<Vec<NormalizedAsset>>, CacheError> {
        Ok(None)
    }

    async fn put(&self, _key: &str, _assets: &[NormalizedAsset]) -> Result<(), CacheError> {
        Ok(())
    }
}

/// In-process cache.
#[derive(Debug, Default)]
pub struct MemoryAssetCache {
    entries: Mutex<HashMap<String, Vec<NormalizedAsset>>>,
}

impl MemoryAssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

#[async_trait]
impl AssetCache for MemoryAssetCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<NormalizedAsset>>, CacheError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn put(&self, key: &str, assets: &[NormalizedAsset]) -> Result<(), CacheError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), assets.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AssetKind;

    #[tokio::test]
    async fn test_memory_cache_roundtrip() {
        let cache = MemoryAssetCache::new();
        assert!(cache.get("NES_zelda_fanart").await.unwrap().is_none());

        let asset = NormalizedAsset {
            asset_kind: AssetKind::Fanart,
            display_name: "Zelda".to_string(),
            thumb_url: "https://t.example.com/z.png".to_string(),
            full_url: "https://i.example.com/z.png".to_string(),
        };
        cache.put("NES_zelda_fanart", &[asset.clone()]).await.unwrap();
        assert_eq!(
            cache.get("NES_zelda_fanart").await.unwrap(),
            Some(vec![asset])
        );
    }

    #[tokio::test]
    async fn test_no_cache_stores_nothing() {
        NoCache.put("k", &[]).await.unwrap();
        assert!(NoCache.get("k").await.unwrap().is_none());
    }
}
