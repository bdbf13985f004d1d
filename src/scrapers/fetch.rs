//! One outbound request per page, classified into a [`RawPage`].

use serde_json::Value;
use tracing::{debug, warn};

use super::extract::extract_path;
use super::redact::redact_url;
use super::strategy::ResultStrategy;
use super::ScrapeError;
use crate::http_client::HttpClient;

/// Outcome class of a single page fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Ok,
    NoData,
    QuotaExceeded,
    ClientError(u16),
    ServerError(u16),
}

/// A classified page.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPage {
    pub status: PageStatus,
    pub payload: Option<Value>,
    pub next_page_marker: Option<u32>,
    /// Backend error message, if the body carried one.
    pub message: Option<String>,
}

impl RawPage {
    pub fn no_data() -> Self {
        Self::with_status(PageStatus::NoData, None)
    }

    fn with_status(status: PageStatus, message: Option<String>) -> Self {
        Self {
            status,
            payload: None,
            next_page_marker: None,
            message,
        }
    }

    /// Payload and marker for `Ok`, `None` for `NoData`, an error for hard failures.
    ///
    /// Quota pages are expected to be handled by the backoff loop before
    /// they get here; one that slips through counts as exhausted.
    pub fn into_result(self) -> Result<Option<(Value, Option<u32>)>, ScrapeError> {
        match self.status {
            PageStatus::Ok => Ok(self
                .payload
                .map(|payload| (payload, self.next_page_marker))),
            PageStatus::NoData => Ok(None),
            PageStatus::QuotaExceeded => Err(ScrapeError::QuotaExhausted { retries: 0 }),
            PageStatus::ClientError(status) | PageStatus::ServerError(status) => {
                Err(ScrapeError::Http {
                    status,
                    message: self
                        .message
                        .unwrap_or_else(|| format!("request failed with status {}", status)),
                })
            }
        }
    }
}

/// Backend error object embedded in a response body.
fn embedded_error(body: &str) -> Option<(u16, Option<String>)> {
    let value: Value = serde_json::from_str(body).ok()?;
    let code = extract_path(&value, "error.code").as_u64()?;
    let code = u16::try_from(code).ok()?;
    let message = extract_path(&value, "error.message")
        .as_str()
        .map(|s| s.to_string());
    Some((code, message))
}

/// Classify a response body and status without doing any I/O.
pub fn classify(http_status: u16, body: &str, strategy: &dyn ResultStrategy) -> RawPage {
    let (status, message) = match embedded_error(body) {
        Some((code, message)) => (code, message),
        None => (http_status, None),
    };

    match status {
        404 => RawPage::no_data(),
        429 => RawPage::with_status(PageStatus::QuotaExceeded, message),
        200 => match strategy.decode(body) {
            Some(payload) => RawPage {
                status: PageStatus::Ok,
                next_page_marker: strategy.next_page_marker(&payload),
                payload: Some(payload),
                message: None,
            },
            None => RawPage::no_data(),
        },
        400..=499 => RawPage::with_status(PageStatus::ClientError(status), message),
        _ => RawPage::with_status(PageStatus::ServerError(status), message),
    }
}

/// Issue exactly one GET and classify the result.
pub async fn fetch_page(client: &HttpClient, url: &str, strategy: &dyn ResultStrategy) -> RawPage {
    let response = match client.get(url).await {
        Ok(response) => response,
        Err(e) => {
            warn!("Request to {} failed: {}", redact_url(url), e);
            return RawPage::no_data();
        }
    };

    let status = response.status.as_u16();
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            warn!("Failed to read body from {}: {}", redact_url(url), e);
            return RawPage::no_data();
        }
    };

    let page = classify(status, &body, strategy);
    debug!(
        "{} page {} classified as {:?}",
        strategy.name(),
        redact_url(url),
        page.status
    );
    page
}
