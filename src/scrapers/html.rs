//! HTML results page strategy.
//!
//! The page embeds its results as a positionally indexed JSON tree with no
//! published schema. All knowledge of that layout lives in the path
//! constants below and in [`HtmlScrapeStrategy::extract_entry`].

use serde_json::Value;

use super::embedded::extract_embedded_json;
use super::extract::{absolute_url, optional_str, required_str};
use super::strategy::{array_at, encode_term, ResultStrategy};
use super::EntryError;
use crate::models::{AssetKind, NormalizedAsset};

/// Path from the wrapped payload to the array of result entries.
pub const RESULTS_PATH: &str = "data.31.0.12.2";
/// Full-resolution image URL inside an entry.
pub const FULL_URL_PATH: &str = "1.3.0";
/// Thumbnail URL inside an entry.
pub const THUMB_URL_PATH: &str = "1.2.0";
/// Optional page title inside an entry.
pub const TITLE_PATH: &str = "1.9.2003.3";

/// Image search by reading the public results page.
#[derive(Debug, Clone)]
pub struct HtmlScrapeStrategy {
    endpoint: String,
}

impl HtmlScrapeStrategy {
    pub const NAME: &'static str = "html";

    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
        }
    }
}

/// Undo the escaped `=` the page leaves in thumbnail query strings.
pub fn normalize_thumb_url(url: &str) -> String {
    url.replace("q\\u003d", "q=")
}

impl ResultStrategy for HtmlScrapeStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn wants_browser_agent(&self) -> bool {
        true
    }

    fn query_template(&self, term: &str) -> String {
        format!(
            "{}?q={}+{{kind}}&source=lnms&tbm=isch",
            self.endpoint,
            encode_term(term)
        )
    }

    fn decode(&self, body: &str) -> Option<Value> {
        extract_embedded_json(body)
    }

    fn entries<'a>(&self, payload: &'a Value) -> &'a [Value] {
        array_at(payload, RESULTS_PATH)
    }

    fn extract_entry(
        &self,
        entry: &Value,
        kind: AssetKind,
        fallback_name: &str,
    ) -> Result<NormalizedAsset, EntryError> {
        let full_url = absolute_url(required_str(entry, FULL_URL_PATH)?)?;
        let thumb_url = absolute_url(&normalize_thumb_url(required_str(entry, THUMB_URL_PATH)?))?;
        let display_name = optional_str(entry, TITLE_PATH).unwrap_or(fallback_name);

        Ok(NormalizedAsset {
            asset_kind: kind,
            display_name: display_name.to_string(),
            thumb_url,
            full_url,
        })
    }
}
