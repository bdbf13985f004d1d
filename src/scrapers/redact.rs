//! Credential redaction for loggable URLs.

use std::sync::LazyLock;

use regex::Regex;

/// Mask written in place of credential values.
pub const REDACTION_MASK: &str = "***";

/// `key=` and `cx=` query parameters, up to the next `&` or fragment.
static CREDENTIAL_PARAMS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([?&](?:key|cx)=)[^&#]*").unwrap());

/// Replace the API key and search engine id in a URL with a mask.
///
/// Only for logs and display. Parameter order and every other parameter are
/// left untouched.
pub fn redact_url(url: &str) -> String {
    CREDENTIAL_PARAMS
        .replace_all(url, format!("${{1}}{}", REDACTION_MASK).as_str())
        .into_owned()
}

/// Whether a URL carries either credential parameter.
pub fn has_credentials(url: &str) -> bool {
    CREDENTIAL_PARAMS.is_match(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacts_key_and_cx() {
        let url = "https://customsearch.googleapis.com/customsearch/v1?cx=abc123&q=castlevania+boxfront&searchType=image&key=SECRETKEY&start=11";
        let redacted = redact_url(url);
        assert_eq!(
            redacted,
            "https://customsearch.googleapis.com/customsearch/v1?cx=***&q=castlevania+boxfront&searchType=image&key=***&start=11"
        );
        assert!(!redacted.contains("abc123"));
        assert!(!redacted.contains("SECRETKEY"));
    }

    #[test]
    fn test_trailing_key_parameter() {
        let url = "https://youtube.googleapis.com/youtube/v3/search?part=snippet&maxResults=40&q=zelda+trailer&videoType=any&key=K-9_x";
        assert_eq!(
            redact_url(url),
            "https://youtube.googleapis.com/youtube/v3/search?part=snippet&maxResults=40&q=zelda+trailer&videoType=any&key=***"
        );
    }

    #[test]
    fn test_similar_names_are_untouched() {
        let url = "https://example.com/?monkey=1&cxx=2&q=key=3";
        assert_eq!(redact_url(url), url);
        assert!(!has_credentials(url));
    }

    #[test]
    fn test_empty_values_still_masked() {
        assert_eq!(
            redact_url("https://example.com/?key=&cx=&q=a"),
            "https://example.com/?key=***&cx=***&q=a"
        );
    }
}
