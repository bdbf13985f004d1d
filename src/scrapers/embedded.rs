//! Extraction of the JSON payload embedded in image search result pages.
//!
//! The result page bootstraps its client-side rendering with several
//! `AF_initDataCallback({key: 'ds:N', hash: 'M', data: [...], sideChannel: {}});`
//! script blocks. The last one carries the image results. The markup is
//! undocumented and changes without notice, so a miss is a normal outcome and
//! is reported as `None`, never as an error.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

/// Start of a data callback, up to and including `data:`.
static CALLBACK_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"AF_initDataCallback\(\{\s*key:\s*'[^']*',\s*(?:hash:\s*'[^']*',\s*)?data:")
        .unwrap()
});

/// Text that terminates the data fragment.
pub const FRAGMENT_SENTINEL: &str = ", sideChannel:";

/// Find the last callback payload in `html` and parse it as `{"data": ...}`.
pub fn extract_embedded_json(html: &str) -> Option<Value> {
    let Some(marker) = CALLBACK_MARKER.find_iter(html).last() else {
        debug!("No data callback marker found in page");
        return None;
    };

    let rest = &html[marker.end()..];
    let Some(end) = rest.find(FRAGMENT_SENTINEL) else {
        debug!("Data callback at byte {} has no sentinel", marker.start());
        return None;
    };

    let wrapped = format!("{{\"data\": {}}}", rest[..end].trim());
    match serde_json::from_str(&wrapped) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("Embedded data fragment is not valid JSON: {}", e);
            None
        }
    }
}
