//! JSON search API strategy for images.

use serde_json::Value;

use super::extract::{absolute_url, extract_path, required_str};
use super::strategy::{array_at, encode_term, ResultStrategy};
use super::EntryError;
use crate::models::{AssetKind, NormalizedAsset};

/// Ten results per page, four pages at most.
pub const API_PAGE_OFFSETS: &[u32] = &[1, 11, 21, 31];

/// Image search through the JSON API.
#[derive(Debug, Clone)]
pub struct ApiStrategy {
    endpoint: String,
    api_key: String,
    search_engine_id: String,
}

impl ApiStrategy {
    pub const NAME: &'static str = "api";

    pub fn new(endpoint: &str, api_key: &str, search_engine_id: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
            search_engine_id: search_engine_id.to_string(),
        }
    }
}

impl ResultStrategy for ApiStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn is_enabled(&self) -> bool {
        !self.api_key.is_empty() && !self.search_engine_id.is_empty()
    }

    fn query_template(&self, term: &str) -> String {
        format!(
            "{}?cx={}&q={}+{{kind}}&searchType=image&key={}&start={{start}}",
            self.endpoint,
            encode_term(&self.search_engine_id),
            encode_term(term),
            encode_term(&self.api_key)
        )
    }

    fn page_offsets(&self) -> &'static [u32] {
        API_PAGE_OFFSETS
    }

    fn decode(&self, body: &str) -> Option<Value> {
        serde_json::from_str(body).ok()
    }

    fn next_page_marker(&self, payload: &Value) -> Option<u32> {
        extract_path(payload, "queries.nextPage.0.startIndex")
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
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
        Ok(NormalizedAsset {
            asset_kind: kind,
            display_name: required_str(entry, "title")?.to_string(),
            thumb_url: absolute_url(required_str(entry, "image.thumbnailLink")?)?,
            full_url: absolute_url(required_str(entry, "link")?)?,
        })
    }
}
