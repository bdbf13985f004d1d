//! The result strategy abstraction.

use serde_json::Value;

use super::EntryError;
use crate::models::{AssetKind, NormalizedAsset};

/// Offsets for strategies that only ever fetch one page.
pub const SINGLE_PAGE: &[u32] = &[1];

/// One backend shape: how to query it, page through it and read its entries.
pub trait ResultStrategy: Send + Sync {
    /// Key for this strategy's template in a candidate.
    fn name(&self) -> &'static str;

    /// Whether the strategy has what it needs to issue requests.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Whether requests should look like they come from a browser.
    fn wants_browser_agent(&self) -> bool {
        false
    }

    /// URL template for a search term, leaving `{kind}` and `{start}` unfilled.
    fn query_template(&self, term: &str) -> String;

    /// Page offsets to request, in order.
    fn page_offsets(&self) -> &'static [u32] {
        SINGLE_PAGE
    }

    /// Decode a 200 response body. `None` means the page holds no data.
    fn decode(&self, body: &str) -> Option<Value>;

    /// Offset of the next page as reported by the backend.
    fn next_page_marker(&self, _payload: &Value) -> Option<u32> {
        None
    }

    /// Result entries of a decoded payload, in upstream order.
    fn entries<'a>(&self, payload: &'a Value) -> &'a [Value];

    /// Map one entry to an asset. `fallback_name` is used when the entry has no title.
    fn extract_entry(
        &self,
        entry: &Value,
        kind: AssetKind,
        fallback_name: &str,
    ) -> Result<NormalizedAsset, EntryError>;
}

/// Encode a search term the way a form field would be (`+` for spaces).
pub fn encode_term(term: &str) -> String {
    url::form_urlencoded::byte_serialize(term.trim().as_bytes()).collect()
}

/// Array at `path` as a slice, empty when missing.
pub fn array_at<'a>(payload: &'a Value, path: &str) -> &'a [Value] {
    super::extract::extract_path(payload, path)
        .as_array()
        .map(|a| a.as_slice())
        .unwrap_or(&[])
}
