//! Video listing strategy used for trailers.

use serde_json::Value;

use super::extract::{absolute_url, required_str};
use super::strategy::{array_at, encode_term, ResultStrategy};
use super::EntryError;
use crate::models::{AssetKind, NormalizedAsset};

/// Placeholder for the video id in the playback URL template.
pub const VIDEO_ID_PLACEHOLDER: &str = "{video_id}";

/// Video search through the JSON API. Always a single page.
#[derive(Debug, Clone)]
pub struct VideoListingStrategy {
    endpoint: String,
    api_key: String,
    max_results: u32,
    playback_url_template: String,
}

impl VideoListingStrategy {
    pub const NAME: &'static str = "video";

    pub fn new(
        endpoint: &str,
        api_key: &str,
        max_results: u32,
        playback_url_template: &str,
    ) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
            max_results,
            playback_url_template: playback_url_template.to_string(),
        }
    }

    /// Playback URL for a video id.
    pub fn playback_url(&self, video_id: &str) -> String {
        self.playback_url_template
            .replace(VIDEO_ID_PLACEHOLDER, &encode_term(video_id))
    }
}

impl ResultStrategy for VideoListingStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn is_enabled(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn query_template(&self, term: &str) -> String {
        format!(
            "{}?part=snippet&maxResults={}&q={}+{{kind}}&videoType=any&key={}",
            self.endpoint,
            self.max_results,
            encode_term(term),
            encode_term(&self.api_key)
        )
    }

    fn decode(&self, body: &str) -> Option<Value> {
        serde_json::from_str(body).ok()
    }

    fn entries<'a>(&self, payload: &'a Value) -> &'a [Value] {
        array_at(payload, "items")
    }

    fn extract_entry(
        &self,
        entry: &Value,
        kind: AssetKind,
        _fallback_name: &str,
    ) -> Result<NormalizedAsset, EntryError> {
        let video_id = required_str(entry, "id.videoId")?;
        Ok(NormalizedAsset {
            asset_kind: kind,
            display_name: required_str(entry, "snippet.title")?.to_string(),
            thumb_url: absolute_url(required_str(entry, "snippet.thumbnails.default.url")?)?,
            full_url: absolute_url(&self.playback_url(video_id))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::settings::DEFAULT_PLAYBACK_URL_TEMPLATE;
    use serde_json::json;

    fn strategy() -> VideoListingStrategy {
        VideoListingStrategy::new(
            "https://video.example.com/search",
            "KEY",
            40,
            DEFAULT_PLAYBACK_URL_TEMPLATE,
        )
    }

    #[test]
    fn test_query_template() {
        assert_eq!(
            strategy().query_template("castlevania"),
            "https://video.example.com/search?part=snippet&maxResults=40&q=castlevania+{kind}&videoType=any&key=KEY"
        );
    }

    #[test]
    fn test_extract_entry_builds_playback_url() {
        let entry = json!({
            "id": {"kind": "youtube#video", "videoId": "abc123"},
            "snippet": {
                "title": "Castlevania trailer",
                "thumbnails": {"default": {"url": "https://i.example.com/abc123/default.jpg"}}
            }
        });
        let asset = strategy()
            .extract_entry(&entry, AssetKind::Trailer, "castlevania")
            .unwrap();
        assert_eq!(
            asset.full_url,
            "plugin://plugin.video.youtube/play/?video_id=abc123"
        );
        assert_eq!(asset.display_name, "Castlevania trailer");
    }

    #[test]
    fn test_channel_results_are_rejected() {
        let entry = json!({
            "id": {"kind": "youtube#channel", "channelId": "UC1"},
            "snippet": {"title": "A channel", "thumbnails": {"default": {"url": "https://i.example.com/c.jpg"}}}
        });
        assert!(strategy()
            .extract_entry(&entry, AssetKind::Trailer, "x")
            .is_err());
    }
}
