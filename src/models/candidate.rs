//! Search candidates and the per-call queries derived from them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::AssetKind;

/// Placeholder for the asset-kind search word in a query template.
pub const KIND_PLACEHOLDER: &str = "{kind}";

/// Placeholder for the page offset in a query template.
pub const START_PLACEHOLDER: &str = "{start}";

/// The single resolved search subject for a term.
///
/// The image backends have no disambiguation step, so one search term always
/// produces exactly one candidate. It carries the query templates forward to
/// every asset lookup made for the term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCandidate {
    /// The search term itself.
    pub id: String,
    pub display_name: String,
    pub platform: String,
    pub order: u32,
    /// Strategy name to URL template with `{kind}` and `{start}` left unfilled.
    pub query_templates: BTreeMap<String, String>,
}

impl SearchCandidate {
    /// Template registered for a strategy, if the candidate was built with it.
    pub fn template(&self, strategy: &str) -> Option<&str> {
        self.query_templates.get(strategy).map(|s| s.as_str())
    }

    /// Cache key for one asset kind fetched through one strategy.
    ///
    /// Backends return different results for the same term, so the strategy
    /// name is part of the key.
    pub fn cache_key(&self, strategy: &str, kind: AssetKind) -> String {
        format!("{}_{}_{}_{}", self.platform, self.id, strategy, kind.as_str())
    }
}

/// One concrete request against a query template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetQuery {
    pub asset_kind: AssetKind,
    /// Search word for the kind, before URL encoding.
    pub term_variant: String,
    pub page_offset: u32,
}

impl AssetQuery {
    pub fn new(asset_kind: AssetKind, page_offset: u32) -> Self {
        Self {
            asset_kind,
            term_variant: asset_kind.search_term().to_string(),
            page_offset,
        }
    }

    /// Fill a query template, encoding the term variant like a form value.
    pub fn render(&self, template: &str) -> String {
        let variant: String =
            url::form_urlencoded::byte_serialize(self.term_variant.as_bytes()).collect();
        template
            .replace(KIND_PLACEHOLDER, &variant)
            .replace(START_PLACEHOLDER, &self.page_offset.to_string())
    }
}
