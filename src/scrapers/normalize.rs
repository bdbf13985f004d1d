//! Turns raw result entries into assets.

use serde_json::Value;
use tracing::{trace, warn};

use super::strategy::ResultStrategy;
use crate::models::{AssetKind, NormalizedAsset};

/// Map entries through the strategy, skipping the ones that fail.
///
/// Upstream order is kept.
pub fn normalize_entries(
    strategy: &dyn ResultStrategy,
    entries: &[Value],
    kind: AssetKind,
    fallback_name: &str,
) -> Vec<NormalizedAsset> {
    entries
        .iter()
        .enumerate()
        .filter_map(
            |(idx, entry)| match strategy.extract_entry(entry, kind, fallback_name) {
                Ok(asset) => Some(asset),
                Err(e) => {
                    warn!("Skipping {} entry {}: {}", strategy.name(), idx, e);
                    trace!("Skipped entry: {}", entry);
                    None
                }
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::ApiStrategy;
    use serde_json::json;

    fn normalize(strategy: &ApiStrategy, payload: &Value) -> Vec<NormalizedAsset> {
        normalize_entries(strategy, strategy.entries(payload), AssetKind::Fanart, "x")
    }

    fn payload() -> Value {
        json!({"items": [
            {"title": "one", "link": "https://img.example.com/1.png",
             "image": {"thumbnailLink": "https://thumb.example.com/1.png"}},
            {"title": "two", "link": "/relative/2.png",
             "image": {"thumbnailLink": "https://thumb.example.com/2.png"}},
            {"title": "three", "link": "https://img.example.com/3.png",
             "image": {"thumbnailLink": "https://thumb.example.com/3.png"}}
        ]})
    }

    #[test]
    fn test_malformed_entry_is_skipped() {
        let strategy = ApiStrategy::new("https://api.example.com/v1", "KEY", "CX");
        let assets = normalize(&strategy, &payload());
        let names: Vec<_> = assets.iter().map(|a| a.display_name.as_str()).collect();
        assert_eq!(names, vec!["one", "three"]);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let strategy = ApiStrategy::new("https://api.example.com/v1", "KEY", "CX");
        let first = normalize(&strategy, &payload());
        let second = normalize(&strategy, &payload());
        assert_eq!(first, second);
    }

    #[test]
    fn test_payload_without_entries() {
        let strategy = ApiStrategy::new("https://api.example.com/v1", "KEY", "CX");
        assert!(normalize(&strategy, &json!({})).is_empty());
    }
}
