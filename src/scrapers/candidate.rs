//! Candidate construction for a search term.

use std::collections::BTreeMap;

use super::strategy::ResultStrategy;
use crate::models::SearchCandidate;

/// Build the one candidate for a term, carrying the image and video templates.
pub fn build_candidate(
    term: &str,
    platform: &str,
    image: &dyn ResultStrategy,
    video: &dyn ResultStrategy,
) -> SearchCandidate {
    let term = term.trim();
    let mut query_templates = BTreeMap::new();
    query_templates.insert(image.name().to_string(), image.query_template(term));
    query_templates.insert(video.name().to_string(), video.query_template(term));

    SearchCandidate {
        id: term.to_string(),
        display_name: term.to_string(),
        platform: platform.to_string(),
        order: 1,
        query_templates,
    }
}
